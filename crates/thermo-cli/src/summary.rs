use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use thermo_cli::pipeline::Loaded;
use thermo_model::Category;
use thermo_transform::SubjectStats;

pub fn print_summary(loaded: &Loaded) {
    let source = &loaded.source;
    let reshaped = &loaded.dataset.reshaped;
    println!("Source: {}", source.path.display());
    println!("SHA-256: {}", source.fingerprint);
    println!(
        "Rows: {}  Subjects: {}  Records: {}",
        reshaped.row_count,
        reshaped.subjects.len(),
        reshaped.records.len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Subject"),
        header_cell("Category"),
        header_cell("Samples"),
        header_cell("Skipped"),
        header_cell("Min"),
        header_cell("Mean"),
        header_cell("Max"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let stats = loaded.dataset.stats();
    let mut total_samples = 0usize;
    let mut total_skipped = 0usize;
    for row in &stats {
        total_samples += row.samples;
        total_skipped += row.skipped;
        table.add_row(stats_row(row));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_samples).add_attribute(Attribute::Bold),
        count_cell(total_skipped, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_skip_table(loaded);
}

fn print_skip_table(loaded: &Loaded) {
    let counts = loaded.dataset.reshaped.skip_counts();
    if counts.values().all(|count| *count == 0) {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Skip reason"), header_cell("Cells")]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, count) in counts {
        table.add_row(vec![Cell::new(reason), count_cell(count, Color::Yellow)]);
    }
    println!("{table}");
}

fn stats_row(stats: &SubjectStats) -> Vec<Cell> {
    vec![
        Cell::new(&stats.subject_id).add_attribute(Attribute::Bold),
        category_cell(stats.category),
        Cell::new(stats.samples),
        count_cell(stats.skipped, Color::Yellow),
        value_cell(stats.min),
        value_cell(stats.mean),
        value_cell(stats.max),
    ]
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
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

fn category_cell(category: Category) -> Cell {
    let color = match category {
        Category::A => Color::Magenta,
        Category::B => Color::Blue,
    };
    Cell::new(category).fg(color)
}

fn value_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.2}")),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
