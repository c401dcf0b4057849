use crate::item::Item;
use crate::registry::ItemRegistry;

/// Bulk export: canonical texts sorted by identity, one per line.
pub fn export(registry: &ItemRegistry) -> String {
    let mut items: Vec<&Item> = registry.iter().collect();
    items.sort_by(|a, b| a.key().cmp(b.key()));

    let mut out = String::new();
    for item in items {
        out.push_str(item.text());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_is_sorted_and_order_independent() {
        let mut a = ItemRegistry::new();
        let mut b = ItemRegistry::new();
        for word in ["Chaos", "angel", "Beans"] {
            a.add(word, "x").unwrap();
        }
        for word in ["beans", "Chaos", "Angel"] {
            b.add(word, "y").unwrap();
        }
        assert_eq!(export(&a), "Angel\nBeans\nChaos\n");
        assert_eq!(export(&a), export(&b));
        assert_eq!(export(&ItemRegistry::new()), "");
    }
}
