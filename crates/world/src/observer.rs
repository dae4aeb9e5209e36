//! Container change notifications and the slot grid presentation model.
//!
//! Emission is a synchronous fan-out in subscription order; there is no
//! queueing. Observers receive the full slot list and redraw from it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::inventory::{ContainerKind, ItemStack};

/// Kind of change a container reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerEvent {
    /// A new slot was appended
    Added,
    /// An existing slot's quantity changed (or a slot was emptied)
    Updated,
}

/// Presentation-side listener for container changes.
pub trait ContainerObserver {
    /// A new slot was appended.
    fn on_item_added(&self, kind: ContainerKind, slots: &[ItemStack]);

    /// An existing slot changed.
    fn on_item_updated(&self, kind: ContainerKind, slots: &[ItemStack]);
}

/// Handle returned by [`ObserverSet::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered set of subscribers for one container.
#[derive(Default)]
pub struct ObserverSet {
    next_id: u64,
    entries: Vec<(ObserverId, Rc<dyn ContainerObserver>)>,
}

impl fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

impl ObserverSet {
    /// Append a subscriber; it is notified after all earlier ones.
    pub fn subscribe(&mut self, observer: Rc<dyn ContainerObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Drop a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fan an event out to every subscriber.
    pub fn notify(&self, event: ContainerEvent, kind: ContainerKind, slots: &[ItemStack]) {
        for (_, observer) in &self.entries {
            match event {
                ContainerEvent::Added => observer.on_item_added(kind, slots),
                ContainerEvent::Updated => observer.on_item_updated(kind, slots),
            }
        }
    }
}

/// One drawn slot of a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotWidget {
    /// Icon handle, `None` for an empty slot
    pub icon: Option<String>,
    /// Display name, empty for an empty slot
    pub label: String,
    /// Count text as shown under the icon
    pub count_text: String,
}

/// Fixed-size grid of slot widgets mirroring a container.
///
/// Additions rebuild the grid from scratch; updates rewrite the existing
/// widgets in place.
#[derive(Debug)]
pub struct SlotGrid {
    widgets: RefCell<Vec<SlotWidget>>,
    rebuilds: Cell<u32>,
    refreshes: Cell<u32>,
}

impl SlotGrid {
    /// Create a grid with `size` empty widgets.
    pub fn new(size: usize) -> Self {
        Self {
            widgets: RefCell::new(vec![SlotWidget::default(); size]),
            rebuilds: Cell::new(0),
            refreshes: Cell::new(0),
        }
    }

    /// Copy of the current widgets.
    pub fn widgets(&self) -> Vec<SlotWidget> {
        self.widgets.borrow().clone()
    }

    /// How many times the grid was rebuilt.
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds.get()
    }

    /// How many times the grid was refreshed in place.
    pub fn refreshes(&self) -> u32 {
        self.refreshes.get()
    }

    fn draw(widget: &mut SlotWidget, stack: &ItemStack) {
        let definition = stack.definition();
        widget.icon = definition.icon.clone();
        widget.label = definition.display_name.clone();
        widget.count_text = stack.quantity().to_string();
    }
}

impl ContainerObserver for SlotGrid {
    fn on_item_added(&self, _kind: ContainerKind, slots: &[ItemStack]) {
        let mut widgets = self.widgets.borrow_mut();
        for widget in widgets.iter_mut() {
            *widget = SlotWidget::default();
        }
        for (widget, stack) in widgets.iter_mut().zip(slots) {
            Self::draw(widget, stack);
        }
        self.rebuilds.set(self.rebuilds.get() + 1);
    }

    fn on_item_updated(&self, _kind: ContainerKind, slots: &[ItemStack]) {
        let mut widgets = self.widgets.borrow_mut();
        for (index, widget) in widgets.iter_mut().enumerate() {
            match slots.get(index) {
                Some(stack) => Self::draw(widget, stack),
                None => *widget = SlotWidget::default(),
            }
        }
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Container;
    use skyjellies_core::{ItemDefinition, ItemId};
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<(ContainerEvent, usize)>>,
    }

    impl ContainerObserver for Recorder {
        fn on_item_added(&self, _kind: ContainerKind, slots: &[ItemStack]) {
            self.events
                .borrow_mut()
                .push((ContainerEvent::Added, slots.len()));
        }

        fn on_item_updated(&self, _kind: ContainerKind, slots: &[ItemStack]) {
            self.events
                .borrow_mut()
                .push((ContainerEvent::Updated, slots.len()));
        }
    }

    fn berry() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new(ItemId(1), "red_berry")
                .with_display_name("Red Berry")
                .with_icon("icons/red_berry")
                .with_max_stack(10),
        )
    }

    #[test]
    fn add_then_merge_emits_added_then_updated() {
        let berry = berry();
        let recorder = Rc::new(Recorder::default());
        let mut hotbar = Container::hotbar(2);
        hotbar.subscribe(recorder.clone());

        hotbar.try_add(ItemStack::new(berry.clone(), 5).unwrap());
        hotbar.try_add(ItemStack::new(berry.clone(), 2).unwrap());

        assert_eq!(
            *recorder.events.borrow(),
            vec![(ContainerEvent::Added, 1), (ContainerEvent::Updated, 1)]
        );
    }

    #[test]
    fn unsubscribed_observers_stay_silent() {
        let recorder = Rc::new(Recorder::default());
        let mut hotbar = Container::hotbar(2);
        let id = hotbar.subscribe(recorder.clone());
        assert!(hotbar.unsubscribe(id));
        assert!(!hotbar.unsubscribe(id));

        hotbar.try_add(ItemStack::new(berry(), 1).unwrap());
        assert!(recorder.events.borrow().is_empty());
    }

    #[test]
    fn slot_grid_redraws_from_slots() {
        let berry = berry();
        let grid = Rc::new(SlotGrid::new(3));
        let mut hotbar = Container::hotbar(3);
        hotbar.subscribe(grid.clone());

        hotbar.try_add(ItemStack::new(berry.clone(), 4).unwrap());
        let widgets = grid.widgets();
        assert_eq!(widgets[0].count_text, "4");
        assert_eq!(widgets[0].icon.as_deref(), Some("icons/red_berry"));
        assert_eq!(widgets[1], SlotWidget::default());
        assert_eq!(grid.rebuilds(), 1);

        hotbar.remove_quantity(berry.id, 4).unwrap();
        assert_eq!(grid.widgets()[0], SlotWidget::default());
        assert_eq!(grid.refreshes(), 1);
    }
}
