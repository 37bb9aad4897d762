//! Script transform pipeline over frontmatter text.

use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, DUMMY_SP, SyntaxContext};
use swc_core::ecma::ast::{
    Ident, ImportDecl, ImportNamedSpecifier, ImportPhase, ImportSpecifier, Module, ModuleDecl,
    ModuleExportName, ModuleItem, Str,
};
use swc_core::ecma::codegen::{text_writer::JsWriter, Config, Emitter};
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax};
use swc_core::ecma::visit::VisitMutWith;

use crate::mapping::{PositionMap, PositionMapping};
use crate::rewriter::{FactoryCallRewriter, FACTORY_NAME};
use crate::traits::RewriteError;

/// Module specifier of the injected runtime import.
pub const RUNTIME_MODULE: &str = "astro/jsx-runtime";

/// Export bound to the target factory name.
const JSX_EXPORT: &str = "jsx";

/// Fragment export carried alongside the factory binding.
const FRAGMENT_NAME: &str = "Fragment";

/// Result of one pipeline run over a frontmatter script.
#[derive(Debug, Clone)]
pub struct ScriptRewrite {
    /// Re-emitted script text, or the original text when nothing matched
    pub text: String,

    /// Whether any factory call was rewritten
    pub did_rewrite: bool,

    /// Script-relative position mappings, present only after a rewrite
    pub map: Option<PositionMap>,
}

pub(crate) struct ParsedScript {
    pub cm: Lrc<SourceMap>,
    pub comments: SingleThreadedComments,
    pub module: Module,
}

pub(crate) fn parse_script(source: &str) -> Result<ParsedScript, RewriteError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom("frontmatter.js".into())),
        source.to_string(),
    );
    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(
        Syntax::Es(EsSyntax::default()),
        Default::default(),
        StringInput::from(&*fm),
        Some(&comments),
    );
    let mut parser = Parser::new_from(lexer);

    let module = match parser.parse_module() {
        Ok(module) => module,
        Err(error) => return Err(parse_error(&cm, &error)),
    };
    if let Some(error) = parser.take_errors().into_iter().next() {
        return Err(parse_error(&cm, &error));
    }

    Ok(ParsedScript {
        cm,
        comments,
        module,
    })
}

fn parse_error(cm: &SourceMap, error: &swc_core::ecma::parser::error::Error) -> RewriteError {
    let line = if error.span().is_dummy() {
        0
    } else {
        cm.lookup_char_pos(error.span().lo()).line
    };
    RewriteError::Parse {
        line,
        message: error.kind().msg().to_string(),
    }
}

/// Rewrite every factory call in a frontmatter script.
///
/// When nothing matches, the original text is returned byte-identical with
/// `did_rewrite: false`. After a rewrite the runtime import is injected at
/// the top, exactly once per run.
pub fn rewrite_script(source: &str) -> Result<ScriptRewrite, RewriteError> {
    let ParsedScript {
        cm,
        comments,
        mut module,
    } = parse_script(source)?;

    let mut rewriter = FactoryCallRewriter::default();
    module.visit_mut_with(&mut rewriter);
    if let Some(error) = rewriter.take_error() {
        return Err(error);
    }

    if !rewriter.outcome.did_rewrite {
        return Ok(ScriptRewrite {
            text: source.to_string(),
            did_rewrite: false,
            map: None,
        });
    }

    if rewriter.outcome.needs_import {
        module.body.insert(0, runtime_import());
    }

    let (text, map) = emit(&cm, &comments, &module)?;
    tracing::debug!(
        "Rewrote frontmatter script with {} position mappings",
        map.mappings.len()
    );

    Ok(ScriptRewrite {
        text,
        did_rewrite: true,
        map: Some(map),
    })
}

/// Build `import { Fragment, jsx as h } from 'astro/jsx-runtime';`.
fn runtime_import() -> ModuleItem {
    ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![
            ImportSpecifier::Named(ImportNamedSpecifier {
                span: DUMMY_SP,
                local: Ident::new(FRAGMENT_NAME.into(), DUMMY_SP, SyntaxContext::empty()),
                imported: None,
                is_type_only: false,
            }),
            ImportSpecifier::Named(ImportNamedSpecifier {
                span: DUMMY_SP,
                local: Ident::new(FACTORY_NAME.into(), DUMMY_SP, SyntaxContext::empty()),
                imported: Some(ModuleExportName::Ident(Ident::new(
                    JSX_EXPORT.into(),
                    DUMMY_SP,
                    SyntaxContext::empty(),
                ))),
                is_type_only: false,
            }),
        ],
        src: Box::new(Str {
            span: DUMMY_SP,
            value: RUNTIME_MODULE.into(),
            raw: Some(format!("'{}'", RUNTIME_MODULE).into()),
        }),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }))
}

fn emit(
    cm: &Lrc<SourceMap>,
    comments: &SingleThreadedComments,
    module: &Module,
) -> Result<(String, PositionMap), RewriteError> {
    let mut buf = Vec::new();
    let mut raw_mappings = Vec::new();
    {
        let writer = JsWriter::new(cm.clone(), "\n", &mut buf, Some(&mut raw_mappings));
        let mut emitter = Emitter {
            cfg: Config::default(),
            comments: Some(comments),
            cm: cm.clone(),
            wr: writer,
        };
        emitter
            .emit_module(module)
            .map_err(|error| RewriteError::Emit(error.to_string()))?;
    }
    let text = String::from_utf8(buf).map_err(|error| RewriteError::Emit(error.to_string()))?;

    // Positions with a zero offset come from synthesized nodes and have no
    // original location to report.
    let mut mappings = Vec::new();
    for (pos, generated) in &raw_mappings {
        if pos.0 == 0 {
            continue;
        }
        let original = cm.lookup_char_pos(*pos);
        mappings.push(PositionMapping {
            generated_line: generated.line as usize + 1,
            generated_column: generated.col as usize,
            original_line: original.line,
            original_column: original.col.0,
        });
    }

    Ok((text, PositionMap { mappings }))
}
