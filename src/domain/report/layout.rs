//! Page layout model shared by all report kinds.
//!
//! Coordinates are millimetres on an A4 page measured from the top-left
//! corner. Text `y` is the baseline, rectangle `y` is the top edge.

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;

pub const MARGIN_MM: f64 = 20.0;

/// Content below this line moves to a new page
pub const CONTENT_BOTTOM_MM: f64 = 270.0;

/// Baseline of the page footer
pub const FOOTER_Y_MM: f64 = 285.0;

const TABLE_ROW_HEIGHT_MM: f64 = 8.0;
const TABLE_CELL_PADDING_MM: f64 = 2.0;
const TABLE_FONT_SIZE: f64 = 10.0;

/// Points to millimetres
const PT_TO_MM: f64 = 25.4 / 72.0;

/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_WIDTH_EM: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const NAVY: Color = Color(0, 51, 102);
    pub const DARK_GRAY: Color = Color(60, 60, 60);
    pub const GRAY: Color = Color(100, 100, 100);
    pub const LIGHT_GRAY: Color = Color(240, 240, 240);
    pub const BLUE: Color = Color(41, 128, 185);
    pub const GREEN: Color = Color(46, 204, 113);
    pub const RED: Color = Color(231, 76, 60);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub size: f64,
    pub color: Color,
}

impl TextStyle {
    pub const TITLE: TextStyle = TextStyle::new(22.0, Color::NAVY);
    pub const HEADING: TextStyle = TextStyle::new(16.0, Color::BLACK);
    pub const SUBHEADING: TextStyle = TextStyle::new(14.0, Color::BLACK);
    pub const BODY: TextStyle = TextStyle::new(12.0, Color::DARK_GRAY);
    pub const DETAIL: TextStyle = TextStyle::new(11.0, Color::DARK_GRAY);
    pub const FOOTER: TextStyle = TextStyle::new(10.0, Color::GRAY);

    pub const fn new(size: f64, color: Color) -> Self {
        Self { size, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    /// `x` is the horizontal centre of the text
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
        align: Align,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    /// All text on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Rect { .. } => None,
        })
    }
}

/// A laid-out report ready to be encoded
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub title: String,
    pub pages: Vec<Page>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text of the document, page by page
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }
}

/// A table column: header text and width in millimetres
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub header: &'a str,
    pub width: f64,
}

/// Approximate rendered width of `text` in millimetres
pub fn approx_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * AVG_GLYPH_WIDTH_EM * PT_TO_MM
}

/// Shorten `text` with an ellipsis so it fits in `width` millimetres
pub fn fit_text(text: &str, width: f64, font_size: f64) -> String {
    if approx_text_width(text, font_size) <= width {
        return text.to_string();
    }

    let max_chars = (width / (font_size * AVG_GLYPH_WIDTH_EM * PT_TO_MM)).floor() as usize;
    let keep = max_chars.saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();

    format!("{}...", truncated)
}

/// Incrementally builds a paginated [`ReportLayout`]
#[derive(Debug)]
pub struct LayoutBuilder {
    title: String,
    pages: Vec<Page>,
}

impl LayoutBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: vec![Page::default()],
        }
    }

    pub fn text(&mut self, text: impl Into<String>, x: f64, y: f64, style: TextStyle) -> &mut Self {
        self.push(Element::Text {
            text: text.into(),
            x,
            y,
            style,
            align: Align::Left,
        })
    }

    pub fn centered_text(&mut self, text: impl Into<String>, y: f64, style: TextStyle) -> &mut Self {
        self.push(Element::Text {
            text: text.into(),
            x: PAGE_WIDTH_MM / 2.0,
            y,
            style,
            align: Align::Center,
        })
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Color) -> &mut Self {
        self.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        })
    }

    pub fn new_page(&mut self) -> &mut Self {
        self.pages.push(Page::default());
        self
    }

    /// Reserve `height` millimetres starting at `y`, breaking to a new page
    /// when it would run past the content area. Returns the usable `y`.
    pub fn reserve(&mut self, y: f64, height: f64) -> f64 {
        if y + height > CONTENT_BOTTOM_MM {
            self.new_page();
            MARGIN_MM
        } else {
            y
        }
    }

    /// Draw a striped table with a filled header row, starting at `y`.
    /// Rows that do not fit continue on a new page under a repeated header.
    /// Returns the `y` just below the last row.
    pub fn table(&mut self, y: f64, columns: &[Column<'_>], rows: &[Vec<String>]) -> f64 {
        let mut y = self.reserve(y, TABLE_ROW_HEIGHT_MM * 2.0);
        y = self.table_header(y, columns);

        for (index, row) in rows.iter().enumerate() {
            if y + TABLE_ROW_HEIGHT_MM > CONTENT_BOTTOM_MM {
                self.new_page();
                y = self.table_header(MARGIN_MM, columns);
            }

            if index % 2 == 1 {
                let width = columns.iter().map(|c| c.width).sum();
                self.rect(MARGIN_MM, y, width, TABLE_ROW_HEIGHT_MM, Color::LIGHT_GRAY);
            }

            let style = TextStyle::new(TABLE_FONT_SIZE, Color::DARK_GRAY);
            self.table_cells(y, columns, row.iter().map(String::as_str), style);
            y += TABLE_ROW_HEIGHT_MM;
        }

        y
    }

    /// Add `text` centred on every page at the footer line and finish
    pub fn finish_with_footer(mut self, footer: &str) -> ReportLayout {
        for page in &mut self.pages {
            page.elements.push(Element::Text {
                text: footer.to_string(),
                x: PAGE_WIDTH_MM / 2.0,
                y: FOOTER_Y_MM,
                style: TextStyle::FOOTER,
                align: Align::Center,
            });
        }

        ReportLayout {
            title: self.title,
            pages: self.pages,
        }
    }

    fn table_header(&mut self, y: f64, columns: &[Column<'_>]) -> f64 {
        let width = columns.iter().map(|c| c.width).sum();
        self.rect(MARGIN_MM, y, width, TABLE_ROW_HEIGHT_MM, Color::BLUE);

        let style = TextStyle::new(TABLE_FONT_SIZE, Color::WHITE);
        self.table_cells(y, columns, columns.iter().map(|c| c.header), style);

        y + TABLE_ROW_HEIGHT_MM
    }

    fn table_cells<'a>(
        &mut self,
        y: f64,
        columns: &[Column<'_>],
        cells: impl Iterator<Item = &'a str>,
        style: TextStyle,
    ) {
        let mut x = MARGIN_MM;
        let baseline = y + TABLE_ROW_HEIGHT_MM - 2.5;

        for (column, cell) in columns.iter().zip(cells) {
            let text = fit_text(cell, column.width - TABLE_CELL_PADDING_MM * 2.0, style.size);
            self.text(text, x + TABLE_CELL_PADDING_MM, baseline, style);
            x += column.width;
        }
    }

    fn push(&mut self, element: Element) -> &mut Self {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
        self
    }
}
