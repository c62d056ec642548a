//! Page assembly
//!
//! Generation is a full regeneration in two passes over a schema that has
//! already been parsed and indexed:
//!
//! 1. one page per constructor and function (`constructors/`, `methods/`)
//! 2. one page per type that has at least one constructor (`types/`)
//!
//! Output directories are created up front, so neither pass touches the
//! filesystem other than to write its own page.

use std::io::{self, Write};

use tracing::{debug, info, warn};

use super::assets;
use super::config::{AssetLinks, DocsConfig};
use super::naming;
use super::paths::{has_type_page, relative_path, LinkBase, PathResolver, SitePath};
use super::writer::{Align, PageWriter, RowStyle};
use super::xref::CrossReferenceIndex;
use crate::error::DocsError;
use crate::schema::{Argument, Schema, SchemaObject};

/// Summary of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Constructor and function pages written
    pub object_pages: usize,
    pub type_pages: usize,
    /// Layer declared by the schema, if any
    pub layer: Option<u32>,
}

impl GenerationReport {
    pub fn total_pages(&self) -> usize {
        self.object_pages + self.type_pages
    }
}

/// Writes the HTML reference for a schema
#[derive(Debug, Clone, Default)]
pub struct DocsGenerator {
    config: DocsConfig,
}

impl DocsGenerator {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    /// Regenerate every page under the configured output directory
    pub fn generate(&self, schema: &Schema) -> Result<GenerationReport, DocsError> {
        check_results(schema)?;

        let root = &self.config.output_dir;
        info!(
            objects = schema.objects.len(),
            layer = ?schema.layer,
            output = %root.display(),
            "generating documentation"
        );

        let index = CrossReferenceIndex::build(&schema.objects);
        PathResolver::ensure_output_dirs(root, &schema.objects, &index)?;
        if self.config.write_default_assets {
            let written = assets::write_default_assets(root, &self.config.assets)?;
            debug!(written, "default assets checked");
        }

        for result in index.unconstructed_results() {
            if has_type_page(result) {
                warn!(
                    type_key = result,
                    "type is returned by a method but has no constructors; its page is not generated"
                );
            }
        }

        let mut report = GenerationReport {
            layer: schema.layer,
            ..GenerationReport::default()
        };

        for object in &schema.objects {
            self.write_object_page(object)?;
            report.object_pages += 1;
        }

        for type_key in index.types() {
            if !has_type_page(type_key) {
                debug!(type_key, "built-in type documented on the core page");
                continue;
            }
            self.write_type_page(
                type_key,
                index.constructors_for(type_key),
                index.functions_returning(type_key),
            )?;
            report.type_pages += 1;
        }

        info!(
            object_pages = report.object_pages,
            type_pages = report.type_pages,
            "documentation generated"
        );
        Ok(report)
    }

    fn write_object_page(&self, object: &SchemaObject) -> Result<(), DocsError> {
        let page = PathResolver::object_path(object);
        let path = page.to_fs_path(&self.config.output_dir);
        let links = self.config.assets.relativize(&LinkBase::File(&page));

        let docs = PageWriter::create(&path, page, &PathResolver)?;
        render_object_page(docs, object, &links).map_err(|source| DocsError::io(&path, source))?;
        debug!(page = %path.display(), name = %object.fullname(), "wrote object page");
        Ok(())
    }

    fn write_type_page(
        &self,
        type_key: &str,
        constructors: &[&SchemaObject],
        functions: &[&SchemaObject],
    ) -> Result<(), DocsError> {
        let page = PathResolver::type_path(type_key);
        let path = page.to_fs_path(&self.config.output_dir);
        let links = self.config.assets.relativize(&LinkBase::File(&page));

        let docs = PageWriter::create(&path, page, &PathResolver)?;
        render_type_page(docs, type_key, constructors, functions, &links)
            .map_err(|source| DocsError::io(&path, source))?;
        debug!(page = %path.display(), type_key, "wrote type page");
        Ok(())
    }
}

/// Every function must declare what it returns
fn check_results(schema: &Schema) -> Result<(), DocsError> {
    match schema
        .functions()
        .find(|function| function.result.trim().is_empty())
    {
        Some(function) => Err(DocsError::MissingResult {
            name: function.fullname(),
        }),
        None => Ok(()),
    }
}

/// Breadcrumb menu shared by both kinds of page
fn write_menu<W: Write>(
    docs: &mut PageWriter<'_, W>,
    links: &AssetLinks,
    (section, section_link): (&str, &str),
    namespace: Option<&str>,
    leaf: &str,
) -> io::Result<()> {
    docs.set_menu_separator(&links.menu_separator);
    docs.add_menu("API", Some(&links.index_all))?;
    docs.add_menu(section, Some(section_link))?;
    if let Some(namespace) = namespace {
        docs.add_menu(namespace, Some("index.html"))?;
    }
    docs.add_menu(leaf, None)?;
    docs.end_menu()
}

fn render_object_page<W: Write>(
    mut docs: PageWriter<'_, W>,
    object: &SchemaObject,
    links: &AssetLinks,
) -> io::Result<W> {
    let class_name = object.class_name();
    docs.write_head(&class_name, &links.stylesheet)?;

    let section = if object.is_function {
        ("Methods", links.index_methods.as_str())
    } else {
        ("Constructors", links.index_constructors.as_str())
    };
    write_menu(
        &mut docs,
        links,
        section,
        object.namespace.as_deref(),
        &object.file_name(),
    )?;

    docs.write_title(&class_name, 1)?;
    docs.write_code(object)?;
    docs.write_title(
        if object.is_function {
            "Parameters"
        } else {
            "Members"
        },
        3,
    )?;

    let args = object.displayable_args();
    if args.is_empty() {
        docs.write_text(if object.is_function {
            "This request takes no input parameters."
        } else {
            "This type has no members."
        })?;
    } else {
        docs.begin_table(3)?;
        for arg in args {
            let type_link = PathResolver::type_link(&arg.ty, &LinkBase::File(docs.page()));
            docs.add_row(&arg.name, RowStyle::default().bold())?;
            docs.add_row(&arg.ty, RowStyle::link(&type_link).align(Align::Center))?;
            docs.add_row(&describe_argument(arg), RowStyle::default())?;
        }
        docs.end_table()?;
    }

    docs.end_body()
}

fn render_type_page<W: Write>(
    mut docs: PageWriter<'_, W>,
    type_key: &str,
    constructors: &[&SchemaObject],
    functions: &[&SchemaObject],
    links: &AssetLinks,
) -> io::Result<W> {
    let (namespace, name) = match type_key.split_once('.') {
        Some((namespace, name)) => (Some(namespace), name),
        None => (None, type_key),
    };
    let class_name = naming::class_name(name);

    docs.write_head(&class_name, &links.stylesheet)?;
    write_menu(
        &mut docs,
        links,
        ("Types", links.index_types.as_str()),
        namespace,
        &naming::file_name(name),
    )?;
    docs.write_title(&class_name, 1)?;

    docs.write_title("Available constructors", 3)?;
    docs.write_text(&constructors_sentence(constructors.len()))?;
    write_object_table(&mut docs, constructors)?;

    docs.write_title("Methods returning this type", 3)?;
    docs.write_text(&functions_sentence(functions.len()))?;
    write_object_table(&mut docs, functions)?;

    docs.end_body()
}

/// Single-column table of objects, each linking to its own page
fn write_object_table<W: Write>(
    docs: &mut PageWriter<'_, W>,
    objects: &[&SchemaObject],
) -> io::Result<()> {
    docs.begin_table(1)?;
    for object in objects {
        let link = object_link(object, docs.page());
        docs.add_row(
            &object.class_name(),
            RowStyle::link(&link).align(Align::Center),
        )?;
    }
    docs.end_table()
}

fn object_link(object: &SchemaObject, from: &SitePath) -> String {
    relative_path(&PathResolver::object_path(object), &LinkBase::File(from))
}

/// Notes shown next to a parameter, empty for a plain required argument
pub fn describe_argument(arg: &Argument) -> String {
    let mut description = String::new();
    if arg.is_vector {
        description.push_str("A list must be supplied for this argument. ");
    }
    if arg.is_generic {
        description.push_str("A different MTProtoRequest must be supplied for this argument. ");
    }
    if arg.is_flag() {
        description.push_str("This argument can be omitted. ");
    }
    description.truncate(description.trim_end().len());
    description
}

pub fn constructors_sentence(count: usize) -> String {
    match count {
        0 => "This type has no constructors available.".to_string(),
        1 => "This type has one constructor available.".to_string(),
        n => format!("This type has {} constructors available.", n),
    }
}

pub fn functions_sentence(count: usize) -> String {
    match count {
        0 => "No method returns this type.".to_string(),
        1 => "Only the following method returns this type.".to_string(),
        n => format!("The following {} methods return this type as a result.", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::AssetPaths;

    fn render_object(object: &SchemaObject) -> String {
        let page = PathResolver::object_path(object);
        let links = AssetPaths::default().relativize(&LinkBase::File(&page));
        let docs = PageWriter::new(Vec::new(), page, &PathResolver);
        String::from_utf8(render_object_page(docs, object, &links).unwrap()).unwrap()
    }

    #[test]
    fn test_sentences() {
        assert_eq!(constructors_sentence(0), "This type has no constructors available.");
        assert_eq!(constructors_sentence(1), "This type has one constructor available.");
        assert_eq!(constructors_sentence(3), "This type has 3 constructors available.");
        assert_eq!(functions_sentence(0), "No method returns this type.");
        assert_eq!(functions_sentence(1), "Only the following method returns this type.");
        assert_eq!(
            functions_sentence(2),
            "The following 2 methods return this type as a result."
        );
    }

    #[test]
    fn test_describe_argument() {
        assert_eq!(describe_argument(&Argument::new("username", "string")), "");
        assert_eq!(
            describe_argument(&Argument::new("id", "int").vector()),
            "A list must be supplied for this argument."
        );
        assert_eq!(
            describe_argument(&Argument::new("query", "X").generic()),
            "A different MTProtoRequest must be supplied for this argument."
        );
        assert_eq!(
            describe_argument(&Argument::new("ids", "int").vector().with_flag("flags", 0)),
            "A list must be supplied for this argument. This argument can be omitted."
        );
    }

    #[test]
    fn test_object_page_breadcrumbs() {
        let object = SchemaObject::new("auth.sendCode", true, "auth.SentCode")
            .with_arg(Argument::new("phone_number", "string"));
        let html = render_object(&object);

        assert!(html.contains("<title>SendCodeRequest</title>"));
        assert!(html.contains("<link href=\"../../css/docs.css\" rel=\"stylesheet\">"));
        assert!(html.contains("<li><a href=\"../../core/index.html\">API</a></li>"));
        assert!(html.contains("<li><a href=\"../index.html\">Methods</a></li>"));
        assert!(html.contains("<li><a href=\"index.html\">auth</a></li>"));
        assert!(html.contains("<li>send_code</li>"));
        assert!(html.contains("<h1>SendCodeRequest</h1>"));
        assert!(html.contains("<h3>Parameters</h3>"));
    }

    #[test]
    fn test_object_page_flag_arguments_go_last() {
        let object = SchemaObject::new("messages.search", true, "messages.Messages")
            .with_arg(Argument::flag_indicator("flags"))
            .with_arg(Argument::new("flag_a", "string").with_flag("flags", 0))
            .with_arg(Argument::new("plain1", "int"))
            .with_arg(Argument::new("plain2", "long"))
            .with_arg(Argument::new("flag_b", "true").with_flag("flags", 1));
        let html = render_object(&object);

        let table = &html[html.find("<table>").unwrap()..];
        let order: Vec<usize> = ["plain1", "plain2", "flag_a", "flag_b"]
            .iter()
            .map(|name| table.find(&format!("<b>{}</b>", name)).unwrap())
            .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!table.contains("<b>flags</b>"));
        assert!(table.contains(
            "<td style=\"text-align:center\"><a href=\"../../core/index.html#long\">long</a></td>"
        ));
    }

    #[test]
    fn test_object_page_without_arguments() {
        let function = SchemaObject::new("help.getConfig", true, "Config");
        assert!(render_object(&function).contains("<p>This request takes no input parameters.</p>"));

        let constructor = SchemaObject::new("boolTrue", false, "Bool");
        let html = render_object(&constructor);
        assert!(html.contains("<h3>Members</h3>"));
        assert!(html.contains("<p>This type has no members.</p>"));
        assert!(html.contains("<li><a href=\"index.html\">Constructors</a></li>"));
    }

    #[test]
    fn test_type_page_lists_constructors_and_functions() {
        let constructors = [
            SchemaObject::new("auth.sentCode", false, "auth.SentCode"),
            SchemaObject::new("auth.sentCodeEmpty", false, "auth.SentCode"),
        ];
        let function = SchemaObject::new("auth.sendCode", true, "auth.SentCode");

        let page = PathResolver::type_path("auth.SentCode");
        let links = AssetPaths::default().relativize(&LinkBase::File(&page));
        let docs = PageWriter::new(Vec::new(), page, &PathResolver);
        let refs: Vec<&SchemaObject> = constructors.iter().collect();
        let html = String::from_utf8(
            render_type_page(docs, "auth.SentCode", &refs, &[&function], &links).unwrap(),
        )
        .unwrap();

        assert!(html.contains("<title>SentCode</title>"));
        assert!(html.contains("<li><a href=\"../index.html\">Types</a></li>"));
        assert!(html.contains("<li><a href=\"index.html\">auth</a></li>"));
        assert!(html.contains("<li>sent_code</li>"));
        assert!(html.contains("<p>This type has 2 constructors available.</p>"));
        assert!(html.contains("<a href=\"../../constructors/auth/sent_code.html\">SentCode</a>"));
        assert!(html.contains(
            "<a href=\"../../constructors/auth/sent_code_empty.html\">SentCodeEmpty</a>"
        ));
        assert!(html.contains("<p>Only the following method returns this type.</p>"));
        assert!(html.contains("<a href=\"../../methods/auth/send_code.html\">SendCodeRequest</a>"));
    }

    #[test]
    fn test_missing_function_result_is_rejected() {
        let schema = Schema {
            objects: vec![SchemaObject::new("broken", true, "")],
            layer: None,
        };
        let tmp = tempfile::TempDir::new().unwrap();
        let generator = DocsGenerator::new(DocsConfig::default().with_output_dir(tmp.path()));
        let err = generator.generate(&schema).unwrap_err();
        assert!(matches!(err, DocsError::MissingResult { name } if name == "broken"));
        assert!(!tmp.path().join("methods").exists());
    }
}
