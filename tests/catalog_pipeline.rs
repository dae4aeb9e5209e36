use skyjellies_assets::catalog_from_str;
use skyjellies_world::{ContainerKind, ItemStack, PlayerInventory};
use std::sync::Arc;

const PACK: &str = r#"
[
  { "id": 1, "name": "red_berry", "max_stack_size": 10,
    "kind": { "food": { "saturation": 10.0 } } },
  { "id": 2, "name": "pickaxe", "stackable": false,
    "kind": { "tool": { "tool": "pickaxe" } } }
]
"#;

#[test]
fn catalog_to_inventory_pipeline_from_json() {
    let catalog = catalog_from_str(PACK).expect("valid pack");
    let berry = catalog.resolve("red_berry").expect("berry");
    let pickaxe = catalog.resolve("2").expect("pickaxe by id");

    let mut player = PlayerInventory::new(2, 4);
    let outcome = player.try_add(ItemStack::new(Arc::clone(pickaxe), 3).expect("stack"));
    assert!(outcome.is_complete());
    // One pickaxe per slot: the hotbar fills, the third goes to the backpack.
    assert_eq!(player.hotbar().len(), 2);
    assert_eq!(player.inventory().len(), 1);
    assert_eq!(player.inventory().kind(), ContainerKind::Inventory);

    let outcome = player.try_add(ItemStack::new(Arc::clone(berry), 25).expect("stack"));
    assert!(outcome.is_complete());
    assert_eq!(player.count_item(berry.id), 25);
    assert_eq!(player.inventory().len(), 4);

    // Consumption only looks at the hotbar, which holds no berries.
    assert!(player.remove_quantity(berry.id, 1).is_err());
    assert_eq!(player.count_item(berry.id), 25);
}
