use std::fmt::Write as _;

use crate::error::{HealthError, Result};
use crate::models::WeeklyPlan;

/// Turns a weekly plan into document bytes.
pub trait PlanRenderer {
    /// `water_intake` is printed as given, in liters per day.
    fn render(&self, plan: &WeeklyPlan, water_intake: &str) -> Result<Vec<u8>>;
}

pub const DOCUMENT_TITLE: &str = "Personalized Weekly Diet Plan";

/// A4 in points.
const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 50.0;

/// Rough Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone)]
struct Line {
    text: String,
    font: Font,
    size: f64,
    centered: bool,
    /// Extra vertical space after the line.
    gap_after: f64,
}

impl Line {
    fn new(text: impl Into<String>, font: Font, size: f64) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            centered: false,
            gap_after: 0.0,
        }
    }

    fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    fn gap(mut self, gap: f64) -> Self {
        self.gap_after = gap;
        self
    }
}

/// Minimal PDF 1.4 writer using the built-in Helvetica fonts.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn layout(plan: &WeeklyPlan, water_intake: &str) -> Vec<Line> {
        let mut lines = vec![
            Line::new(DOCUMENT_TITLE, Font::Bold, 16.0).centered().gap(10.0),
            Line::new(
                format!("Recommended Water Intake: {} liters/day", water_intake),
                Font::Regular,
                12.0,
            )
            .gap(10.0),
        ];

        for day in &plan.days {
            lines.push(Line::new(format!("{}:", day.day), Font::Bold, 14.0).gap(5.0));
            let count = day.meals.len();
            for (i, meal) in day.meals.iter().enumerate() {
                let gap = if i + 1 == count { 5.0 } else { 0.0 };
                for wrapped in wrap(&meal.summary_line(), 12.0) {
                    lines.push(Line::new(wrapped, Font::Regular, 12.0));
                }
                if let Some(last) = lines.last_mut() {
                    last.gap_after = gap;
                }
            }
        }

        lines
    }

    /// Place lines top to bottom, starting a new page when one fills up.
    fn paginate(lines: &[Line]) -> Result<Vec<String>> {
        let mut pages = Vec::new();
        let mut stream = String::new();
        let mut y = PAGE_HEIGHT - MARGIN;

        for line in lines {
            let advance = line.size * 1.2;
            if y - advance < MARGIN && !stream.is_empty() {
                pages.push(std::mem::take(&mut stream));
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= advance;

            let text = escape(&line.text);
            let x = if line.centered {
                let width = line.text.chars().count() as f64 * line.size * AVG_GLYPH_WIDTH;
                ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
            } else {
                MARGIN
            };

            writeln!(
                stream,
                "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
                line.font.resource(),
                line.size,
                x,
                y,
                text
            )
            .map_err(|e| HealthError::Render(e.to_string()))?;

            y -= line.gap_after;
        }

        if !stream.is_empty() || pages.is_empty() {
            pages.push(stream);
        }
        Ok(pages)
    }

    fn assemble(pages: &[String]) -> Vec<u8> {
        // 1 catalog, 2 page tree, 3-4 fonts, then a page and its content per page
        let first_page = 5;
        let kids = (0..pages.len())
            .map(|i| format!("{} 0 R", first_page + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        for (i, content) in pages.iter().enumerate() {
            let content_id = first_page + 2 * i + 1;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, content_id
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ));
        }

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }

        let xref_offset = out.len();
        out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            out.push_str(&format!("{:010} 00000 n \n", offset));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));

        out.into_bytes()
    }
}

impl PlanRenderer for PdfRenderer {
    fn render(&self, plan: &WeeklyPlan, water_intake: &str) -> Result<Vec<u8>> {
        let lines = Self::layout(plan, water_intake);
        let pages = Self::paginate(&lines)?;
        Ok(Self::assemble(&pages))
    }
}

/// Escape a string for a PDF literal. Anything outside printable ASCII
/// becomes `?`.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Greedy word wrap to the usable page width.
fn wrap(text: &str, size: f64) -> Vec<String> {
    let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (size * AVG_GLYPH_WIDTH)) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current.push_str("  ");
        } else if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, MealEntry, NutrientTargets, Weekday};

    fn week(meals_per_day: u32) -> WeeklyPlan {
        let targets = NutrientTargets {
            bmi: 22.86,
            water_liters: 2.31,
            protein_per_meal: 18.7,
            carbs_per_meal: 28.0,
            fats_per_meal: 9.3,
        };
        WeeklyPlan {
            days: Weekday::ALL
                .iter()
                .map(|&day| DayPlan {
                    day,
                    meals: (1..=meals_per_day)
                        .map(|i| MealEntry::new(i, &targets, "Lentil soup (spicy)"))
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a (b) \\c"), "a \\(b\\) \\\\c");
        assert_eq!(escape("café"), "caf?");
    }

    #[test]
    fn test_wrap_keeps_short_lines() {
        assert_eq!(wrap("one two three", 12.0), vec!["one two three"]);
    }

    #[test]
    fn test_wrap_splits_long_lines() {
        let long = "word ".repeat(60);
        let lines = wrap(&long, 12.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 90));
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = PdfRenderer::new().render(&week(3), "2.31").unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains(DOCUMENT_TITLE));
        assert!(text.contains("Recommended Water Intake: 2.31 liters/day"));
        assert!(text.contains("(Monday:)"));
        assert!(text.contains("Lentil soup \\(spicy\\)"));
    }

    #[test]
    fn test_large_plan_spans_pages() {
        let text = String::from_utf8(PdfRenderer::new().render(&week(8), "3.0").unwrap()).unwrap();
        let count_marker = text
            .split("/Count ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap();
        assert!(count_marker > 1);
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = PdfRenderer::new().render(&week(1), "1.5").unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let xref = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();

        for (i, offset) in entries.iter().enumerate() {
            assert!(text[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_water_printed_as_given() {
        let text = String::from_utf8(PdfRenderer::new().render(&week(1), "3.0").unwrap()).unwrap();
        assert!(text.contains("Recommended Water Intake: 3.0 liters/day"));
    }
}
