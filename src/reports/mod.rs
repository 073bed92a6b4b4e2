use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyrank::analyzer::NgramFacts;
use keyrank::api::{Progress, RankedRow};
use keyrank::geometry::{GeometryModel, Hand};
use keyrank::ranking::SearchWindow;

/// Maps a color name from the geometry (`"orange3"`, `"deep_pink2"`, `"#e36f42"`)
/// to a terminal color. Unknown names render uncolored.
pub fn to_color(name: &str) -> Option<Color> {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }

    // Shade suffixes ("orange3") pick the same base color
    let base = name
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_ascii_lowercase();

    let color = match base.as_str() {
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" | "purple" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "grey" | "gray" => Color::Grey,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        "white" => Color::White,
        "black" => Color::Black,
        "orange" | "dark_orange" => Color::Rgb {
            r: 215,
            g: 135,
            b: 0,
        },
        "chartreuse" | "spring_green" => Color::Rgb {
            r: 95,
            g: 215,
            b: 0,
        },
        "deep_pink" => Color::Rgb {
            r: 215,
            g: 0,
            b: 135,
        },
        "royal_blue" | "dodger_blue" => Color::Rgb {
            r: 0,
            g: 135,
            b: 255,
        },
        _ => return None,
    };
    Some(color)
}

fn colored(text: impl ToString, color: Option<&str>) -> Cell {
    let cell = Cell::new(text);
    match color.and_then(to_color) {
        Some(c) => cell.fg(c),
        None => cell,
    }
}

fn hands_cell(facts: &NgramFacts) -> Cell {
    let pattern = facts.hand_pattern_str();
    if facts.is_single_hand() {
        let color = match facts.hand_pattern.first() {
            Some(Hand::Left) => Color::Cyan,
            _ => Color::Magenta,
        };
        Cell::new(pattern).fg(color)
    } else {
        Cell::new(pattern)
    }
}

fn category_cell(facts: &NgramFacts) -> Cell {
    let glyphs: String = facts
        .display_cells
        .iter()
        .map(|c| c.glyph.as_str())
        .collect();
    // One cell has one color; the first key decides
    colored(glyphs, facts.display_cells.first().map(|c| c.color.as_str()))
}

fn fact_cells(facts: &NgramFacts) -> Vec<Cell> {
    vec![
        Cell::new(facts.ngram.to_string()),
        Cell::new(&facts.symbols).add_attribute(Attribute::Bold),
        category_cell(facts),
        hands_cell(facts),
        Cell::new(facts.fingers_str()),
        colored(facts.repeat_label(), facts.repeat.map(|(k, _)| k.color())),
        colored(
            facts.row_diff_label(),
            facts.row_diffs.iter().max().map(|d| d.color()),
        ),
        colored(
            facts.direction.map(|d| d.to_string()).unwrap_or_default(),
            facts.direction.map(|d| d.color()),
        ),
        if facts.is_redirect {
            Cell::new("yes").fg(Color::Red)
        } else {
            Cell::new("")
        },
    ]
}

const FACT_HEADER: [&str; 9] = [
    "Keys", "Symbols", "Cat", "Hands", "Fingers", "Repeat", "RowDiff", "Direction", "Redirect",
];

pub fn print_ranking(rows: &[RankedRow], total: usize) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Rank").add_attribute(Attribute::Bold)];
    header.extend(
        FACT_HEADER
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for row in rows {
        let mut cells = vec![Cell::new(row.rank).set_alignment(CellAlignment::Right)];
        cells.extend(fact_cells(&row.facts));
        table.add_row(cells);
    }

    println!("{table}");
    println!("{} of {} ranked ngrams shown", rows.len(), total);
}

/// Text bar over the ranking: excluded ranks as `.`, the open search area as `#`,
/// split at the current candidate.
pub fn position_bar(window: &SearchWindow, width: usize) -> String {
    let total =
        window.excluded_below + window.open_below + window.open_above + window.excluded_above;
    if total == 0 {
        return format!("[{}]", " ".repeat(width));
    }

    // Segment ends are rounded cumulatively so the widths always sum to `width`
    let scale = |n: usize| (n * width + total / 2) / total;
    let end_below = scale(window.excluded_below);
    let end_open_below = scale(window.excluded_below + window.open_below);
    let end_open_above = scale(total - window.excluded_above);

    let below = end_below;
    let open_below = end_open_below - end_below;
    let open_above = end_open_above - end_open_below;
    let above = width - end_open_above;

    format!(
        "[{}{}|{}{}]",
        ".".repeat(below),
        "#".repeat(open_below),
        "#".repeat(open_above),
        ".".repeat(above)
    )
}

pub fn print_comparison(
    new: &NgramFacts,
    candidate: &NgramFacts,
    candidate_rank: usize,
    window: &SearchWindow,
    progress: Progress,
    comparisons: usize,
) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let mut header = vec![Cell::new("")];
    header.extend(FACT_HEADER.iter().map(Cell::new));
    table.set_header(header);

    let mut new_row = vec![Cell::new("new").add_attribute(Attribute::Bold)];
    new_row.extend(fact_cells(new));
    table.add_row(new_row);

    let mut cand_row = vec![Cell::new(format!("#{}", candidate_rank))];
    cand_row.extend(fact_cells(candidate));
    table.add_row(cand_row);

    println!("\n{table}");
    println!(
        "{}  ranked {}/{}  comparisons {}",
        position_bar(window, 40),
        progress.placed,
        progress.total,
        comparisons
    );
    println!(
        "Is '{}' easier (h/<), harder (l/>) or equal (=) to '{}'? [u]ndo [r]estart [q]uit",
        new.symbols, candidate.symbols
    );
}

pub fn print_check(geometry: &GeometryModel, progress: Progress, issues: &[(usize, String)]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec!["Check", "Result"]);

    let left = geometry.keys_on(Hand::Left).count();
    let right = geometry.keys_on(Hand::Right).count();
    table.add_row(vec![
        Cell::new("Keys"),
        Cell::new(format!("{} ({} left, {} right)", geometry.key_count(), left, right)),
    ]);
    table.add_row(vec![
        Cell::new("Ranked"),
        Cell::new(format!("{} of {}", progress.placed, progress.total)),
    ]);
    let status = if issues.is_empty() {
        Cell::new("OK").fg(Color::Green)
    } else {
        Cell::new(format!("{} mismatched", issues.len())).fg(Color::Red)
    };
    table.add_row(vec![Cell::new("Ranking vs geometry"), status]);
    println!("{table}");

    for (rank, reason) in issues {
        println!("  rank {}: {}", rank, reason);
    }
}
