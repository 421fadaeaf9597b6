//! Multi-notation rendering of widget trees.
//!
//! Rendering is a structural transliteration: every widget renders itself
//! and the occupied docking points it owns, in a fixed per-kind order.

use crate::config::{EditorConfig, EditorMode, LogicSyntax};
use crate::docking::Slot;
use crate::forest::Forest;
use crate::widgets::{Widget, WidgetId, WidgetKind};
use serde::{Deserialize, Serialize};

/// Output notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// LaTeX for display.
    Latex,
    /// Machine-evaluable expression.
    Python,
    /// Chemistry markup (mhchem).
    MhChem,
    /// Presentation MathML.
    MathMl,
    /// Flattened form used to build comparison keys.
    Subscript,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Latex,
        Format::Python,
        Format::MhChem,
        Format::MathMl,
        Format::Subscript,
    ];
}

/// Options that change how widgets render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub mode: EditorMode,
    pub logic_syntax: LogicSyntax,
}

impl From<&EditorConfig> for RenderOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            mode: config.mode,
            logic_syntax: config.logic_syntax,
        }
    }
}

/// Read-only view of one widget and its subtree.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    forest: &'a Forest,
    widget: &'a Widget,
    options: RenderOptions,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(forest: &'a Forest, widget: &'a Widget, options: RenderOptions) -> Self {
        Self {
            forest,
            widget,
            options,
        }
    }

    pub fn widget(&self) -> &'a Widget {
        self.widget
    }

    pub fn kind(&self) -> &'a WidgetKind {
        &self.widget.kind
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// View of the child docked at `slot`.
    pub fn child(&self, slot: Slot) -> Option<NodeView<'a>> {
        let id = self.widget.child(slot)?;
        let widget = self.forest.get(id)?;
        Some(Self::new(self.forest, widget, self.options))
    }

    pub fn render(&self, format: Format) -> String {
        self.widget.kind.format(self, format)
    }

    pub fn render_child(&self, slot: Slot, format: Format) -> Option<String> {
        self.child(slot).map(|child| child.render(format))
    }
}

/// Render the `right` continuation of an operand, inserting the implicit
/// multiplication appropriate to `format` when the continuation is not an operator.
pub(crate) fn continuation(node: &NodeView<'_>, format: Format) -> String {
    let Some(child) = node.child(Slot::Right) else {
        return String::new();
    };
    let rendered = child.render(format);
    if child.kind().is_operator() {
        return rendered;
    }
    format!("{}{}", implicit_multiplication(node, &child, format), rendered)
}

fn implicit_multiplication(left: &NodeView<'_>, right: &NodeView<'_>, format: Format) -> &'static str {
    let options = left.options();
    match options.mode {
        EditorMode::Logic => match (format, options.logic_syntax) {
            (Format::Latex | Format::MhChem, LogicSyntax::Logic) => " \\land ",
            (Format::Latex | Format::MhChem, LogicSyntax::Binary) => " \\cdot ",
            (Format::Python, _) => " & ",
            (Format::MathMl, LogicSyntax::Logic) => "<mo>&#x2227;</mo>",
            (Format::MathMl, LogicSyntax::Binary) => "<mo>&#x22C5;</mo>",
            (Format::Subscript, _) => "",
        },
        EditorMode::Chemistry => "",
        EditorMode::Maths => match format {
            Format::Latex => {
                let numbers = matches!(left.kind(), WidgetKind::Num(_))
                    && matches!(right.kind(), WidgetKind::Num(_));
                if numbers { " \\cdot " } else { " " }
            }
            Format::Python => "*",
            Format::MathMl => "<mo>&#x2062;</mo>",
            Format::MhChem => " ",
            Format::Subscript => "",
        },
    }
}

/// LaTeX/mhchem subscript and superscript suffix.
pub(crate) fn tex_scripts(sub: Option<String>, sup: Option<String>) -> String {
    let mut out = String::new();
    if let Some(sub) = sub {
        out.push_str(&format!("_{{{}}}", sub));
    }
    if let Some(sup) = sup {
        out.push_str(&format!("^{{{}}}", sup));
    }
    out
}

/// Evaluable-notation exponent suffix.
pub(crate) fn python_power(sup: Option<String>) -> String {
    sup.map(|s| format!("**({})", s)).unwrap_or_default()
}

/// Wrap a MathML base with its scripts.
pub(crate) fn mathml_scripts(base: String, sub: Option<String>, sup: Option<String>) -> String {
    match (sub, sup) {
        (None, None) => base,
        (Some(sub), None) => format!("<msub>{}<mrow>{}</mrow></msub>", base, sub),
        (None, Some(sup)) => format!("<msup>{}<mrow>{}</mrow></msup>", base, sup),
        (Some(sub), Some(sup)) => format!(
            "<msubsup>{}<mrow>{}</mrow><mrow>{}</mrow></msubsup>",
            base, sub, sup
        ),
    }
}

/// Escape text for inclusion in MathML.
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Rendered forms of the primary expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionResult {
    pub tex: String,
    pub mhchem: String,
    pub python: String,
    pub mathml: String,
    pub unique_symbols: String,
}

impl Forest {
    /// View of a widget for rendering.
    pub fn view(&self, id: WidgetId, options: RenderOptions) -> Option<NodeView<'_>> {
        self.get(id).map(|w| NodeView::new(self, w, options))
    }

    /// Render the subtree rooted at `id`, trimmed.
    pub fn render(&self, id: WidgetId, format: Format, options: RenderOptions) -> Option<String> {
        self.view(id, options)
            .map(|view| view.render(format).trim().to_string())
    }

    /// Sorted, de-duplicated comparison keys of every symbol under `root`.
    pub fn unique_symbols(&self, root: WidgetId, options: RenderOptions) -> Vec<String> {
        let mut keys: Vec<String> = self
            .descendants(root)
            .into_iter()
            .filter_map(|id| self.view(id, options))
            .filter_map(|view| match view.kind() {
                WidgetKind::Symbol(symbol) => Some(symbol.key(&view)),
                WidgetKind::Fn(function) if function.custom => Some(function.name.clone()),
                _ => None,
            })
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// All output notations for the tree rooted at `root`.
    pub fn expression_result(&self, root: WidgetId, options: RenderOptions) -> Option<ExpressionResult> {
        let render = |format| self.render(root, format, options);
        Some(ExpressionResult {
            tex: render(Format::Latex)?,
            mhchem: render(Format::MhChem)?,
            python: render(Format::Python)?,
            mathml: format!(
                "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">{}</math>",
                render(Format::MathMl)?
            ),
            unique_symbols: self.unique_symbols(root, options).join(", "),
        })
    }
}
