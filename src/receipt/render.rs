use super::{ReceiptForm, CPF_GROUP};
use crate::layout::{
    layout_segments, render_layout, BreakOptions, ConnectorWords, GroupId, Margins, PageRenderer,
    RenderOptions,
};
use crate::pagesize::{self, PageSize};
use crate::{
    Document, Font, FontFamily, Info, Mm, Page, Pt, ReceiptError, SpanFont, SpanLayout, Style,
    TextMeasurer,
};
use std::path::{Path, PathBuf};

/// Who signs the receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    /// Printed in bold under the date
    pub name: String,
    /// Printed as given, after "CPF "
    pub cpf: String,
}

/// TrueType files to embed instead of the standard Helvetica pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFiles {
    pub regular: Vec<u8>,
    pub bold: Vec<u8>,
}

/// Page geometry and wording of a receipt. Distances run down the page, from
/// one baseline to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptConfig {
    /// Defaults to A4 portrait
    pub page_size: PageSize,
    /// Left and right margin
    pub margin_x: Pt,
    /// The block is centred vertically but never starts higher than this
    pub min_top: Pt,
    pub title: String,
    pub title_size: Pt,
    /// Size of the body, date and signature text
    pub body_size: Pt,
    /// Baseline to baseline within the body
    pub line_pitch: Pt,
    pub title_height: Pt,
    pub after_title: Pt,
    pub after_body: Pt,
    pub date_height: Pt,
    pub after_date: Pt,
    /// Baseline to baseline within the signature block
    pub signature_pitch: Pt,
    /// [None] indents the first line by three spaces
    pub first_line_indent: Option<Pt>,
    /// Words no body line should end on
    pub connectors: ConnectorWords,
    pub pair_connectors: bool,
    /// Centre the first body line when the CPF clause did not fit on it
    pub center_first_line_if_wrapped: bool,
    pub city: String,
    /// Signature block under the date, left out when [None]
    pub issuer: Option<Issuer>,
    /// Faces to embed; [None] uses Helvetica without embedding anything
    pub font_files: Option<FontFiles>,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        ReceiptConfig {
            page_size: pagesize::A4,
            margin_x: Mm(22.0).into(),
            min_top: Mm(18.0).into(),
            title: "RECIBO".to_string(),
            title_size: Pt(16.0),
            body_size: Pt(12.0),
            line_pitch: Mm(7.0).into(),
            title_height: Mm(10.0).into(),
            after_title: Mm(10.0).into(),
            after_body: Mm(12.0).into(),
            date_height: Mm(7.0).into(),
            after_date: Mm(16.0).into(),
            signature_pitch: Mm(6.0).into(),
            first_line_indent: None,
            connectors: ConnectorWords::portuguese(),
            pair_connectors: true,
            center_first_line_if_wrapped: true,
            city: "Juiz de Fora".to_string(),
            issuer: None,
            font_files: None,
        }
    }
}

impl ReceiptConfig {
    /// Same as [ReceiptConfig::default]
    pub fn new() -> ReceiptConfig {
        ReceiptConfig::default()
    }

    /// Size of the single page, see [pagesize]
    pub fn page_size(&mut self, page_size: PageSize) -> &mut Self {
        self.page_size = page_size;
        self
    }

    /// Left and right margin
    pub fn margin_x<D: Into<Pt>>(&mut self, margin: D) -> &mut Self {
        self.margin_x = margin.into();
        self
    }

    /// Centred heading above the body
    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn body_size(&mut self, size: Pt) -> &mut Self {
        self.body_size = size;
        self
    }

    /// Replaces the three-space indent
    pub fn first_line_indent(&mut self, indent: Pt) -> &mut Self {
        self.first_line_indent = Some(indent);
        self
    }

    pub fn connectors(&mut self, connectors: ConnectorWords) -> &mut Self {
        self.connectors = connectors;
        self
    }

    pub fn pair_connectors(&mut self, pair: bool) -> &mut Self {
        self.pair_connectors = pair;
        self
    }

    pub fn center_first_line_if_wrapped(&mut self, center: bool) -> &mut Self {
        self.center_first_line_if_wrapped = center;
        self
    }

    /// Where the receipt is signed, printed before the date
    pub fn city<S: ToString>(&mut self, city: S) -> &mut Self {
        self.city = city.to_string();
        self
    }

    /// Adds the signature block
    pub fn issuer(&mut self, issuer: Issuer) -> &mut Self {
        self.issuer = Some(issuer);
        self
    }

    /// Embeds `regular` and `bold` TrueType faces and measures with them
    pub fn font_files(&mut self, regular: Vec<u8>, bold: Vec<u8>) -> &mut Self {
        self.font_files = Some(FontFiles { regular, bold });
        self
    }

    fn signature_height(&self) -> Pt {
        match self.issuer {
            Some(_) => self.after_date + self.signature_pitch * 2.0,
            None => Pt::ZERO,
        }
    }
}

/// A finished receipt
#[derive(Debug, Clone)]
pub struct RenderedReceipt {
    /// See [ReceiptForm::file_name]
    pub file_name: String,
    /// The whole PDF
    pub bytes: Vec<u8>,
    /// How many lines the body was broken into
    pub body_lines: usize,
    /// Whether the CPF clause was pushed off the first line
    pub first_group_wrapped: bool,
}

impl RenderedReceipt {
    /// Writes the PDF into `dir` under [RenderedReceipt::file_name]
    pub fn save_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ReceiptError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        log::debug!("saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Lays out and renders `form` on a single page
pub fn render_receipt(
    form: &ReceiptForm,
    config: &ReceiptConfig,
) -> Result<RenderedReceipt, ReceiptError> {
    form.validate()?;

    let mut doc = Document::default();
    let family = match &config.font_files {
        Some(files) => doc.add_family(
            Font::load(files.regular.clone())?,
            Font::load(files.bold.clone())?,
        ),
        None => doc.add_helvetica(),
    };

    let mut info = Info::new();
    info.title(format!("Recibo - {}", form.issued_to()))
        .subject("Recibo de instrumentação cirúrgica");
    if let Some(issuer) = &config.issuer {
        info.author(&issuer.name);
    }
    doc.set_info(info);

    let (_, page_height) = config.page_size;
    let mut page = Page::new(
        config.page_size,
        Some(Margins::symmetric(config.min_top, config.margin_x)),
    );
    let left = page.content_box.x1;
    let max_width = page.content_box.width();

    let measurer = doc.measurer(family);
    let indent = config
        .first_line_indent
        .unwrap_or_else(|| measurer.measure("   ", Style::Normal, config.body_size));
    let mut options = BreakOptions::new(max_width, config.body_size);
    options
        .first_line_indent(indent)
        .connectors(config.connectors.clone())
        .pair_connectors(config.pair_connectors)
        .primary_group(GroupId::named(CPF_GROUP));
    let layout = layout_segments(&form.segments(), &measurer, &options);

    let body_height = config.line_pitch * layout.lines.len() as f32;
    let total = config.title_height
        + config.after_title
        + body_height
        + config.after_body
        + config.date_height
        + config.signature_height();
    let y_start = ((page_height - total) / 2.0).max(config.min_top);
    let title_y = page_height - y_start;

    let title_width = measurer.measure(&config.title, Style::Bold, config.title_size);
    let signature: Vec<(String, Pt)> = config
        .issuer
        .iter()
        .flat_map(|issuer| [issuer.name.clone(), format!("CPF {}", issuer.cpf)])
        .map(|line| {
            let width = measurer.measure(&line, Style::Bold, config.body_size);
            (line, width)
        })
        .collect();

    let centred = |width: Pt| (config.page_size.0 - width) / 2.0;

    page.add_span(span(
        &config.title,
        family,
        Style::Bold,
        config.title_size,
        (centred(title_width), title_y),
    ));

    let body_y = title_y - (config.title_height + config.after_title);
    let mut render = RenderOptions::new((left, body_y), config.line_pitch, max_width);
    render
        .first_line_indent(indent)
        .center_first_line_if_wrapped(config.center_first_line_if_wrapped);
    let end_y = render_layout(
        &layout,
        &mut PageRenderer::new(&mut page, family, config.body_size),
        &render,
    );

    let date_y = end_y - config.after_body;
    page.add_span(span(
        &format!("{}, {}", config.city, form.date.long_form()),
        family,
        Style::Normal,
        config.body_size,
        (left, date_y),
    ));

    let mut signature_y = date_y - config.after_date;
    for (line, width) in signature.iter() {
        page.add_span(span(
            line,
            family,
            Style::Bold,
            config.body_size,
            (centred(*width), signature_y),
        ));
        signature_y -= config.signature_pitch;
    }

    doc.add_page(page);
    let bytes = doc.to_bytes()?;

    log::debug!(
        "rendered receipt for {:?}: {} body lines, cpf wrapped: {}",
        form.issued_to(),
        layout.lines.len(),
        layout.first_group_wrapped
    );

    Ok(RenderedReceipt {
        file_name: form.file_name(),
        bytes,
        body_lines: layout.lines.len(),
        first_group_wrapped: layout.first_group_wrapped,
    })
}

fn span(text: &str, family: FontFamily, style: Style, size: Pt, coords: (Pt, Pt)) -> SpanLayout {
    SpanLayout {
        text: text.to_string(),
        font: SpanFont {
            id: family.font(style),
            size,
        },
        coords,
    }
}
