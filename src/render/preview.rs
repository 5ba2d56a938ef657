use etiket_common::{CanonicalField, LabelData};

const INNER_WIDTH: usize = 34;

/// Terminalde gösterilecek etiket önizlemesi
pub fn preview(label: &LabelData) -> String {
    let mut lines = vec![format!("┌{}┐", "─".repeat(INNER_WIDTH + 2))];

    for field in CanonicalField::ALL {
        let value = label.get(field);
        if value.trim().is_empty() {
            continue;
        }
        let line = format!("{:<12} {}", field.label(), value);
        lines.push(format!("│ {} │", pad(&line)));
    }

    lines.push(format!("└{}┘", "─".repeat(INNER_WIDTH + 2)));
    lines.join("\n")
}

fn pad(text: &str) -> String {
    let count = text.chars().count();
    if count > INNER_WIDTH {
        let cut: String = text.chars().take(INNER_WIDTH - 1).collect();
        format!("{}…", cut)
    } else {
        format!("{}{}", text, " ".repeat(INNER_WIDTH - count))
    }
}
