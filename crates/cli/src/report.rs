use resonance_engine::{ItemReport, NumberReport, ValueFacts, VisibleView};
use resonance_graph::ColorFamily;
use resonance_indexer::ResonanceGroup;
use std::collections::BTreeMap;

pub fn render_groups(groups: &[ResonanceGroup]) -> String {
    let mut md = String::new();
    md.push_str("# Shared resonances\n\n");
    if groups.is_empty() {
        md.push_str("No shared resonances.\n");
        return md;
    }
    md.push_str("| layer | value | items |\n");
    md.push_str("|---|---:|---|\n");
    for group in groups {
        md.push_str(&format!(
            "| {} | `{}` | {} |\n",
            group.layer,
            group.value,
            escape_cell(&group.items.join(", "))
        ));
    }
    md
}

pub fn render_item_report(report: &ItemReport) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Resonance report for {}\n\n", report.text));
    md.push_str(&format!("- Origins: {}\n", report.origins.join(", ")));
    md.push_str(&format!("- Palindrome: {}\n", yes_no(report.palindrome)));
    md.push_str(&format!(
        "- Color: `{}` ({}, hue {:.1})\n\n",
        report.color, report.family, report.hue
    ));

    md.push_str("## Shared resonances\n\n");
    if report.shared.is_empty() {
        md.push_str("No shared resonances.\n\n");
    } else {
        for shared in &report.shared {
            md.push_str(&format!(
                "- {} `{}`: {}\n",
                shared.layer,
                shared.value,
                shared.others.join(", ")
            ));
        }
        md.push('\n');
    }

    md.push_str("## Layers\n\n");
    md.push_str("| layer | value | sqrt | square | prime | palindrome | numerology | golden |\n");
    md.push_str("|---|---:|---:|---|---|---|---:|---|\n");
    for layer in &report.layers {
        md.push_str(&format!("| {} {}\n", layer.layer, facts_cells(&layer.facts)));
    }
    md.push('\n');

    let hands = &report.hands;
    md.push_str("## Hand balance (right minus left)\n\n");
    md.push_str(&format!(
        "- Positional: `{}` ({:?})\n",
        hands.positional, hands.positional_reading
    ));
    md.push_str(&format!("- Count: `{}` ({:?})\n\n", hands.count, hands.count_reading));

    let binary = &report.binary;
    md.push_str("## Binary\n\n");
    md.push_str(&format!("- Representation: `{}`\n", binary.representation));
    md.push_str(&format!(
        "- Sum: `{}`{}\n",
        binary.sum,
        binary
            .reading
            .map(|r| format!(" ({r:?})"))
            .unwrap_or_default()
    ));
    md
}

pub fn render_number_report(report: &NumberReport) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Resonances for {}\n\n", report.facts.value));
    md.push_str("| value | sqrt | square | prime | palindrome | numerology | golden |\n");
    md.push_str("|---:|---:|---|---|---|---:|---|\n");
    md.push_str(&format!("{}\n\n", facts_cells(&report.facts)));

    md.push_str("## Matches\n\n");
    if report.matches.is_empty() {
        md.push_str("No matches found.\n");
    }
    for found in &report.matches {
        md.push_str(&format!("- {}: {}\n", found.layer, found.items.join(", ")));
    }
    md
}

pub fn render_primes(groups: &[&ResonanceGroup]) -> String {
    let mut md = String::new();
    md.push_str("# Prime connections\n\n");
    if groups.is_empty() {
        md.push_str("None.\n");
    }
    for group in groups {
        md.push_str(&format!(
            "- {} ({}: {})\n",
            group.items.join(" & "),
            group.layer,
            group.value
        ));
    }
    md
}

pub fn render_color_families(families: &BTreeMap<ColorFamily, Vec<String>>) -> String {
    let mut md = String::new();
    md.push_str("# Color families\n\n");
    for (family, items) in families {
        md.push_str(&format!("## {family} ({})\n\n", items.len()));
        md.push_str(&items.join(", "));
        md.push_str("\n\n");
    }
    md
}

pub fn render_view(view: &VisibleView) -> String {
    let mut md = String::new();
    md.push_str("# Visible view\n\n");
    if let Some(reason) = &view.reason {
        md.push_str(&format!("Query rejected: {reason}\n"));
        return md;
    }

    md.push_str(&format!("## Nodes ({})\n\n", view.nodes.len()));
    md.push_str("| item | x | y | z | color | size | opacity |\n");
    md.push_str("|---|---:|---:|---:|---|---:|---:|\n");
    for node in &view.nodes {
        let [x, y, z] = node.position;
        md.push_str(&format!(
            "| {}{} | {x:.3} | {y:.3} | {z:.3} | `{}` | {} | {:.2} |\n",
            node.text,
            if node.highlighted { " *" } else { "" },
            node.color,
            node.size,
            node.opacity
        ));
    }

    md.push_str(&format!("\n## Edges ({})\n\n", view.edges.len()));
    md.push_str("| source | target | layer | value | style | width | color |\n");
    md.push_str("|---|---|---|---:|---|---:|---|\n");
    for edge in &view.edges {
        md.push_str(&format!(
            "| {} | {} | {} | `{}` | {:?} | {} | `{}` |\n",
            edge.source, edge.target, edge.layer, edge.value, edge.style, edge.width, edge.color
        ));
    }
    md
}

fn facts_cells(facts: &ValueFacts) -> String {
    format!(
        "| `{}` | {} | {} | {} | {} | {} | {} |",
        facts.value,
        facts
            .sqrt
            .map_or("n/a".to_string(), |v| format!("{v:.2}")),
        yes_no(facts.perfect_square),
        yes_no(facts.prime),
        yes_no(facts.palindrome),
        facts.numerology.map_or("n/a".to_string(), |v| v.to_string()),
        yes_no(facts.golden),
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonance_encoding::Value;

    #[test]
    fn groups_render_as_table_rows() {
        let groups = vec![ResonanceGroup {
            layer: "Simple".into(),
            value: Value::Int(48),
            items: vec!["Beans".into(), "Snaeb".into()],
        }];
        let md = render_groups(&groups);
        assert!(md.contains("| Simple | `48` | Beans, Snaeb |"));
        assert!(render_groups(&[]).contains("No shared resonances."));
    }

    #[test]
    fn rejected_view_shows_reason() {
        let md = render_view(&VisibleView::empty("Unknown layer: Nope"));
        assert!(md.contains("Query rejected: Unknown layer: Nope"));
    }
}
