use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use refmatch_map::{BatchResult, Resolution};
use refmatch_model::{Decision, DecisionTier, FieldMatch};

use crate::commands::{AliasListing, ScoreReport};

pub fn print_resolution(resolution: &Resolution, limit: usize) {
    println!(
        "Value: {:?} ({})",
        resolution.search_term, resolution.field_type
    );
    if resolution.matches.is_empty() {
        println!("  no candidate above the similarity floor");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("#"),
            header_cell("ID"),
            header_cell("Name"),
            header_cell("Similarity"),
            header_cell("Type"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for (rank, matched) in resolution.matches.iter().take(limit).enumerate() {
            table.add_row(vec![
                dim_cell(rank + 1),
                Cell::new(&matched.id),
                name_cell(matched),
                similarity_cell(matched.similarity),
                Cell::new(matched.match_type),
            ]);
        }
        println!("{table}");
        let hidden = resolution.matches.len().saturating_sub(limit);
        if hidden > 0 {
            println!("  ... {hidden} more");
        }
    }
    println!("Decision: {}", decision_line(&resolution.decision));
}

pub fn print_batch(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Decision"),
        header_cell("Chosen"),
        header_cell("Similarity"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for resolution in &result.resolutions {
        let chosen = resolution.decision.chosen();
        table.add_row(vec![
            Cell::new(&resolution.search_term),
            tier_cell(resolution.decision.tier()),
            chosen.map_or_else(|| dim_cell("-"), name_cell),
            chosen.map_or_else(|| dim_cell("-"), |m| similarity_cell(m.similarity)),
        ]);
    }
    println!("{table}");
    print_tier_counts(result);
}

fn print_tier_counts(result: &BatchResult) {
    let counts = result.count_by_tier();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tier"),
        header_cell("Count"),
        header_cell("Meaning"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for tier in DecisionTier::ALL {
        let count = counts.get(&tier).copied().unwrap_or(0);
        table.add_row(vec![
            tier_cell(tier),
            if count > 0 {
                Cell::new(count).add_attribute(Attribute::Bold)
            } else {
                dim_cell(count)
            },
            dim_cell(tier.description()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.resolutions.len()).add_attribute(Attribute::Bold),
        dim_cell(format!("{} need review", result.needs_review().len())),
    ]);
    println!("{table}");
}

pub fn print_score(report: &ScoreReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Edit distance"), Cell::new(report.distance)]);
    table.add_row(vec![
        Cell::new("Character similarity"),
        similarity_cell(report.similarity),
    ]);
    table.add_row(vec![
        Cell::new("Composite score"),
        similarity_cell(report.composite),
    ]);
    if let Some((field_type, score)) = &report.field_score {
        table.add_row(vec![
            Cell::new(format!("Field score ({field_type})")),
            Cell::new(score.explain()),
        ]);
    }
    println!("{table}");
}

pub fn print_aliases(listings: &[AliasListing]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Alias"),
        header_cell("Canonical"),
    ]);
    apply_table_style(&mut table);
    for listing in listings {
        for (alias, target) in &listing.entries {
            table.add_row(vec![
                dim_cell(listing.field_type),
                Cell::new(alias),
                Cell::new(target),
            ]);
        }
    }
    println!("{table}");
}

fn decision_line(decision: &Decision) -> String {
    let tier = decision.tier();
    match decision.chosen() {
        Some(chosen) => format!(
            "{tier} -> {} [{}] ({})",
            chosen.name,
            chosen.id,
            tier.description()
        ),
        None => format!("{tier} ({})", tier.description()),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn name_cell(matched: &FieldMatch) -> Cell {
    let alternates: Vec<&str> = [matched.local_name.as_deref(), matched.alternate_name.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if alternates.is_empty() {
        Cell::new(&matched.name)
    } else {
        Cell::new(format!("{} ({})", matched.name, alternates.join(", ")))
    }
}

fn similarity_cell(similarity: u8) -> Cell {
    let color = match similarity {
        95..=100 => Color::Green,
        85..=94 => Color::Cyan,
        60..=84 => Color::Yellow,
        _ => Color::Red,
    };
    Cell::new(format!("{similarity}%")).fg(color)
}

fn tier_cell(tier: DecisionTier) -> Cell {
    let color = match tier {
        DecisionTier::AutoAccept | DecisionTier::AutoCorrected => Color::Green,
        DecisionTier::SmartAutoAccept => Color::Cyan,
        DecisionTier::BestGuess => Color::Yellow,
        DecisionTier::Reject => Color::Red,
    };
    Cell::new(tier).fg(color).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
