use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::*;
use regex::Regex;

use crate::error::{Result, StocklistError};
use crate::report::{row_cells, PricedRecord};

// A4 dimensions (mm), 0.6" margins
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_TOP: f32 = 15.24;
const MARGIN_BOTTOM: f32 = 15.24;
const MARGIN_LEFT: f32 = 15.24;
const ROW_H: f32 = 5.0;
const FONT_SIZE: f32 = 7.0;
const TITLE_SIZE: f32 = 14.0;
const SUBTITLE_SIZE: f32 = 10.0;

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.len() as f32 * size * 0.18
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Col {
    header: &'static str,
    width: f32,
    align: Align,
}

const COLS: &[Col] = &[
    Col { header: "SL", width: 8.0, align: Align::Right },
    Col { header: "Model", width: 34.0, align: Align::Left },
    Col { header: "Qty", width: 8.0, align: Align::Right },
    Col { header: "ListPrice", width: 17.0, align: Align::Right },
    Col { header: "20%", width: 17.0, align: Align::Right },
    Col { header: "25%", width: 17.0, align: Align::Right },
    Col { header: "30%", width: 17.0, align: Align::Right },
    Col { header: "GP%", width: 11.0, align: Align::Right },
    Col { header: "COGS", width: 17.0, align: Align::Right },
    Col { header: "COGSx1.75", width: 18.0, align: Align::Right },
    Col { header: "1.27", width: 17.0, align: Align::Right },
];

struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    current_page: PdfPageIndex,
    current_layer: PdfLayerIndex,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| StocklistError::Pdf(format!("{e:?}")))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| StocklistError::Pdf(format!("{e:?}")))?;
        Ok(Self {
            doc,
            font,
            font_bold,
            current_page: page,
            current_layer: layer,
            y: MARGIN_TOP,
        })
    }

    fn pdf_y(&self) -> f32 {
        PAGE_H - self.y
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer");
        self.current_page = page;
        self.current_layer = layer;
        self.y = MARGIN_TOP;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > PAGE_H - MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn text(&self, s: &str, x: f32, size: f32, bold: bool) {
        let font = if bold {
            self.font_bold.clone()
        } else {
            self.font.clone()
        };
        let layer = self
            .doc
            .get_page(self.current_page)
            .get_layer(self.current_layer);
        layer.use_text(s, size, Mm(x), Mm(self.pdf_y()), &font);
    }

    fn centered_text(&self, s: &str, size: f32, bold: bool) {
        let tw = approx_text_width(s, size);
        self.text(s, (PAGE_W - tw) / 2.0, size, bold);
    }

    fn hline(&self, x1: f32, x2: f32) {
        let layer = self
            .doc
            .get_page(self.current_page)
            .get_layer(self.current_layer);
        layer.set_outline_thickness(0.5);
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.pdf_y())), false),
                (Point::new(Mm(x2), Mm(self.pdf_y())), false),
            ],
            is_closed: false,
        };
        layer.add_line(line);
    }

    fn header(&mut self, title: &str, date_label: &str, company: &str) {
        self.centered_text(title, TITLE_SIZE, true);
        self.y += 8.0;
        self.centered_text(date_label, SUBTITLE_SIZE, false);
        self.y += 5.0;
        if !company.is_empty() {
            self.centered_text(company, SUBTITLE_SIZE, false);
            self.y += 5.0;
        }
        self.y += 3.0;
    }

    fn table_width(&self) -> f32 {
        COLS.iter().map(|c| c.width).sum()
    }

    fn table_header(&mut self) {
        self.ensure_space(ROW_H * 2.0);
        let mut x = MARGIN_LEFT;
        for col in COLS {
            match col.align {
                Align::Left => self.text(col.header, x, FONT_SIZE, true),
                Align::Right => {
                    let tw = approx_text_width(col.header, FONT_SIZE);
                    self.text(col.header, x + col.width - tw, FONT_SIZE, true);
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
        self.hline(MARGIN_LEFT, MARGIN_LEFT + self.table_width());
        self.y += 1.0;
    }

    fn table_row(&mut self, values: &[String]) {
        self.ensure_space(ROW_H);
        let mut x = MARGIN_LEFT;
        for (col, value) in COLS.iter().zip(values) {
            match col.align {
                Align::Left => self.text(value, x, FONT_SIZE, false),
                Align::Right => {
                    let tw = approx_text_width(value, FONT_SIZE);
                    self.text(value, x + col.width - tw, FONT_SIZE, false);
                }
            }
            x += col.width;
        }
        self.y += ROW_H;
    }

    fn to_bytes(self) -> Result<Vec<u8>> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| StocklistError::Pdf(format!("{e:?}")))?;
        Ok(buf
            .into_inner()
            .map_err(|e| StocklistError::Pdf(e.to_string()))?)
    }
}

pub fn render_stock_list(
    records: &[PricedRecord],
    company: &str,
    date_label: &str,
) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new("VFD STOCK LIST")?;
    pdf.header("VFD STOCK LIST", date_label, company);
    pdf.table_header();

    for r in records {
        pdf.table_row(&row_cells(r));
    }

    pdf.to_bytes()
}

/// Next free `<prefix>_<date>_V.<NN>.pdf` in `dir`, one past the highest
/// existing version for the same day.
pub fn versioned_pdf_path(dir: &Path, prefix: &str, date_tag: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let pattern = format!(
        r"^{}_{}_V\.(\d+)\.pdf$",
        regex::escape(prefix),
        regex::escape(date_tag)
    );
    let re = Regex::new(&pattern).map_err(|e| StocklistError::Pdf(e.to_string()))?;

    let mut max_version = 0u32;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if let Some(caps) = re.captures(name) {
                if let Ok(v) = caps[1].parse::<u32>() {
                    max_version = max_version.max(v);
                }
            }
        }
    }
    Ok(dir.join(format!("{prefix}_{date_tag}_V.{:02}.pdf", max_version + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank: usize, model: &str) -> PricedRecord {
        PricedRecord {
            rank,
            model: model.to_string(),
            quantity: 2,
            unit_cost: 25000.0,
            unit_cost_x175: 43750.0,
            list_price: Some(50000.0),
            discount20: Some(40000.0),
            discount25: Some(37500.0),
            discount30: Some(35000.0),
            gross_profit_pct: Some(50.0),
            secondary_price: None,
        }
    }

    #[test]
    fn test_render_produces_pdf() {
        let records = vec![record(1, "FR-D720S-5.5K"), record(2, "FR-F840-37K")];
        let bytes = render_stock_list(&records, "Test Corp", "24 Jul 2025").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_handles_many_rows() {
        // Enough rows to force pagination.
        let records: Vec<PricedRecord> =
            (1..=120).map(|i| record(i, "FR-D720S-5.5K")).collect();
        let bytes = render_stock_list(&records, "", "24 Jul 2025").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_versioned_pdf_path() {
        let dir = tempfile::tempdir().unwrap();
        let first = versioned_pdf_path(dir.path(), "SISL_VFD_PL", "250724").unwrap();
        assert!(first.ends_with("SISL_VFD_PL_250724_V.01.pdf"));

        std::fs::write(dir.path().join("SISL_VFD_PL_250724_V.01.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("SISL_VFD_PL_250724_V.07.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("SISL_VFD_PL_250723_V.09.pdf"), b"x").unwrap();
        let next = versioned_pdf_path(dir.path(), "SISL_VFD_PL", "250724").unwrap();
        assert!(next.ends_with("SISL_VFD_PL_250724_V.08.pdf"));
    }
}
