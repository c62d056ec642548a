//! Sequential HTML emitter for a single page
//!
//! A [`PageWriter`] owns one output stream for its whole lifetime. Calls are
//! made in document order: head, menu, titles, code, tables, text and
//! finally [`PageWriter::end_body`], which flushes and hands the stream back.
//! Dropping a writer early still closes the underlying file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::paths::{LinkBase, SitePath, TypeLinker};
use crate::error::DocsError;
use crate::schema::{Argument, SchemaObject};

/// Horizontal alignment of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn as_css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Presentation of a single table cell
#[derive(Debug, Clone, Copy, Default)]
pub struct RowStyle<'s> {
    pub bold: bool,
    pub link: Option<&'s str>,
    pub align: Option<Align>,
}

impl<'s> RowStyle<'s> {
    pub fn link(link: &'s str) -> Self {
        Self {
            link: Some(link),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

/// Writes one HTML page
pub struct PageWriter<'a, W: Write> {
    out: W,
    /// Location of this page, the base for every type link
    page: SitePath,
    linker: &'a dyn TypeLinker,
    menu_separator: Option<String>,
    menu_began: bool,
    table_columns: usize,
    /// Cells still missing from the open row, if any
    table_columns_left: Option<usize>,
}

impl<'a> PageWriter<'a, BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write `page` into it
    pub fn create(
        path: &Path,
        page: SitePath,
        linker: &'a dyn TypeLinker,
    ) -> Result<Self, DocsError> {
        let file = File::create(path).map_err(|source| DocsError::io(path, source))?;
        Ok(Self::new(BufWriter::new(file), page, linker))
    }
}

impl<'a, W: Write> PageWriter<'a, W> {
    pub fn new(out: W, page: SitePath, linker: &'a dyn TypeLinker) -> Self {
        Self {
            out,
            page,
            linker,
            menu_separator: None,
            menu_began: false,
            table_columns: 0,
            table_columns_left: None,
        }
    }

    pub fn page(&self) -> &SitePath {
        &self.page
    }

    /// Document preamble up to the opening of the main container
    pub fn write_head(&mut self, title: &str, stylesheet: &str) -> io::Result<()> {
        writeln!(self.out, "<!DOCTYPE html>")?;
        writeln!(self.out, "<html>")?;
        writeln!(self.out, "<head>")?;
        writeln!(
            self.out,
            "  <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">"
        )?;
        writeln!(self.out, "  <title>{}</title>", escape_html(title))?;
        writeln!(
            self.out,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(
            self.out,
            "  <link href=\"{}\" rel=\"stylesheet\">",
            escape_html(stylesheet)
        )?;
        writeln!(self.out, "</head>")?;
        writeln!(self.out, "<body>")?;
        writeln!(self.out, "<div id=\"main_div\">")
    }

    /// Image placed between consecutive menu entries
    pub fn set_menu_separator(&mut self, image: &str) {
        self.menu_separator = Some(image.to_string());
    }

    pub fn add_menu(&mut self, label: &str, link: Option<&str>) -> io::Result<()> {
        if self.menu_began {
            if let Some(separator) = &self.menu_separator {
                writeln!(
                    self.out,
                    "  <img src=\"{}\" alt=\"/\" />",
                    escape_html(separator)
                )?;
            }
        } else {
            self.menu_began = true;
            writeln!(self.out, "<ul class=\"horizontal\">")?;
        }

        write!(self.out, "  <li>")?;
        match link {
            Some(link) => write!(
                self.out,
                "<a href=\"{}\">{}</a>",
                escape_html(link),
                escape_html(label)
            )?,
            None => write!(self.out, "{}", escape_html(label))?,
        }
        writeln!(self.out, "</li>")
    }

    pub fn end_menu(&mut self) -> io::Result<()> {
        if self.menu_began {
            self.menu_began = false;
            writeln!(self.out, "</ul>")?;
        }
        Ok(())
    }

    /// `<h{level}>`; level is clamped to 1..=6
    pub fn write_title(&mut self, text: &str, level: u8) -> io::Result<()> {
        let level = level.clamp(1, 6);
        writeln!(self.out, "<h{level}>{}</h{level}>", escape_html(text))
    }

    /// The definition as it appears in the schema, with every type linked
    pub fn write_code(&mut self, object: &SchemaObject) -> io::Result<()> {
        let section = if object.is_function {
            "---functions---"
        } else {
            "---types---"
        };
        writeln!(self.out, "<pre>{}", section)?;
        write!(
            self.out,
            "{}#{:08x}",
            escape_html(&object.fullname()),
            object.id
        )?;

        for arg in &object.args {
            write!(self.out, " ")?;
            self.write_code_argument(arg)?;
        }

        write!(self.out, " = ")?;
        if object.generic_parameter() == Some(object.result.as_str()) {
            write!(self.out, "{}", escape_html(&object.result))?;
        } else {
            self.write_result_type(&object.result)?;
        }
        writeln!(self.out, "</pre>")
    }

    fn write_code_argument(&mut self, arg: &Argument) -> io::Result<()> {
        if arg.generic_definition {
            write!(self.out, "{{{}:", escape_html(&arg.name))?;
            self.write_type_link(&arg.ty)?;
            return write!(self.out, "}}");
        }

        write!(self.out, "{}:", escape_html(&arg.name))?;
        if arg.flag_indicator {
            return write!(self.out, "#");
        }
        if let Some(flag) = &arg.flag {
            write!(self.out, "{}.{}?", escape_html(&flag.field), flag.index)?;
        }
        if arg.is_generic {
            write!(self.out, "!")?;
        }
        if arg.is_vector {
            let keyword = if arg.bare_vector { "vector" } else { "Vector" };
            let link = self.link_to("vector");
            write!(
                self.out,
                "<a href=\"{}\">{}</a>&lt;",
                escape_html(&link),
                keyword
            )?;
            self.write_type_link(&arg.ty)?;
            write!(self.out, "&gt;")
        } else {
            self.write_type_link(&arg.ty)
        }
    }

    /// Results may be `Vector<T>`; each half gets its own link
    fn write_result_type(&mut self, result: &str) -> io::Result<()> {
        let inner = result
            .strip_suffix('>')
            .and_then(|r| r.split_once('<'))
            .filter(|(keyword, _)| keyword.eq_ignore_ascii_case("vector"));

        match inner {
            Some((keyword, element)) => {
                let link = self.link_to("vector");
                write!(
                    self.out,
                    "<a href=\"{}\">{}</a>&lt;",
                    escape_html(&link),
                    escape_html(keyword)
                )?;
                self.write_type_link(element)?;
                write!(self.out, "&gt;")
            }
            None => self.write_type_link(result),
        }
    }

    fn write_type_link(&mut self, type_key: &str) -> io::Result<()> {
        let link = self.link_to(type_key);
        write!(
            self.out,
            "<a href=\"{}\">{}</a>",
            escape_html(&link),
            escape_html(type_key)
        )
    }

    fn link_to(&self, type_key: &str) -> String {
        self.linker.type_link(type_key, &LinkBase::File(&self.page))
    }

    pub fn begin_table(&mut self, columns: usize) -> io::Result<()> {
        self.table_columns = columns.max(1);
        self.table_columns_left = None;
        writeln!(self.out, "<table>")
    }

    /// Add one cell; rows open and close automatically every `columns` cells
    pub fn add_row(&mut self, text: &str, style: RowStyle<'_>) -> io::Result<()> {
        let left = match self.table_columns_left {
            Some(left) => left,
            None => {
                writeln!(self.out, "<tr>")?;
                self.table_columns
            }
        };

        write!(self.out, "  <td")?;
        if let Some(align) = style.align {
            write!(self.out, " style=\"text-align:{}\"", align.as_css())?;
        }
        write!(self.out, ">")?;
        if style.bold {
            write!(self.out, "<b>")?;
        }
        match style.link {
            Some(link) => write!(
                self.out,
                "<a href=\"{}\">{}</a>",
                escape_html(link),
                escape_html(text)
            )?,
            None => write!(self.out, "{}", escape_html(text))?,
        }
        if style.bold {
            write!(self.out, "</b>")?;
        }
        writeln!(self.out, "</td>")?;

        let left = left - 1;
        if left == 0 {
            self.table_columns_left = None;
            writeln!(self.out, "</tr>")
        } else {
            self.table_columns_left = Some(left);
            Ok(())
        }
    }

    /// Close the table, finishing a partially filled row
    pub fn end_table(&mut self) -> io::Result<()> {
        if self.table_columns_left.take().is_some() {
            writeln!(self.out, "</tr>")?;
        }
        writeln!(self.out, "</table>")
    }

    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "<p>{}</p>", escape_html(text))
    }

    /// Close the document and flush, returning the underlying stream
    pub fn end_body(mut self) -> io::Result<W> {
        writeln!(self.out, "</div>")?;
        writeln!(self.out, "</body>")?;
        writeln!(self.out, "</html>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Escape the characters that are significant in text and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
