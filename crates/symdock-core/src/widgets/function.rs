//! Named functions: built-in (`sin`, `log`, ...) and user-defined.

use super::{WidgetTrait, operand_right, subscript_point, superscript_point};
use crate::config::EditorConfig;
use crate::docking::{DockType, DockingPoint, Slot};
use crate::format::{Format, NodeView, continuation, escape_xml, mathml_scripts, python_power, tex_scripts};
use crate::layout::{LayoutContext, SlotLayout, enclose_argument, place_right, place_scripts};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Functions LaTeX typesets as operators (`\sin`).
const LATEX_OPERATORS: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot", "sinh", "cosh", "tanh", "coth", "arcsin", "arccos",
    "arctan", "ln", "log", "exp",
];

/// Functions whose superscript binds to the name (`\sin^{2}(x)`).
const TRIGONOMETRIC: &[&str] = &[
    "sin", "cos", "tan", "sec", "csc", "cot", "sinh", "cosh", "tanh", "cosech", "sech", "coth",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub allow_subscript: bool,
    #[serde(default)]
    pub inner_superscript: bool,
}

impl Function {
    /// A built-in function. `log` takes a base subscript; trigonometric
    /// functions take their power on the name.
    pub fn builtin(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            allow_subscript: name == "log",
            inner_superscript: TRIGONOMETRIC.contains(&name.as_str()),
            custom: false,
            name,
        }
    }

    /// A user-defined function such as `f(x)`.
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            custom: true,
            allow_subscript: false,
            inner_superscript: false,
        }
    }

    fn latex_name(&self) -> String {
        if !self.custom && LATEX_OPERATORS.contains(&self.name.as_str()) {
            format!("\\{}", self.name)
        } else {
            format!("\\text{{{}}}", self.name)
        }
    }

    /// Trigonometric inverse written as a power of -1.
    fn is_inverse(&self, sup: Option<&str>) -> bool {
        self.inner_superscript && !self.custom && sup.map(str::trim) == Some("-1")
    }

    fn python(&self, node: &NodeView<'_>, argument: &str) -> String {
        let sup = node.render_child(Slot::Superscript, Format::Python);
        if self.is_inverse(sup.as_deref()) {
            return format!("arc{}({})", self.name, argument);
        }
        let call = match node.render_child(Slot::Subscript, Format::Python) {
            Some(base) if self.name == "log" => format!("log({}, {})", argument, base),
            _ => format!("{}({})", self.name, argument),
        };
        call + &python_power(sup)
    }

    fn latex(&self, node: &NodeView<'_>, format: Format, argument: &str) -> String {
        let sub = node.render_child(Slot::Subscript, format);
        let sup = node.render_child(Slot::Superscript, format);
        let name = self.latex_name();
        if self.inner_superscript {
            format!("{}{}\\left({}\\right)", name, tex_scripts(sub, sup), argument)
        } else {
            format!("{}{}\\left({}\\right){}", name, tex_scripts(sub, None), argument, tex_scripts(None, sup))
        }
    }

    fn mathml(&self, node: &NodeView<'_>, argument: &str) -> String {
        let sub = node.render_child(Slot::Subscript, Format::MathMl);
        let sup = node.render_child(Slot::Superscript, Format::MathMl);
        let name = format!("<mi>{}</mi>", escape_xml(&self.name));
        let call = |name: String| {
            format!("{}<mo>&#x2061;</mo><mrow><mo>(</mo>{}<mo>)</mo></mrow>", name, argument)
        };
        if self.inner_superscript {
            call(mathml_scripts(name, sub, sup))
        } else {
            let inner = call(mathml_scripts(name, sub, None));
            mathml_scripts(format!("<mrow>{}</mrow>", inner), None, sup)
        }
    }
}

impl WidgetTrait for Function {
    const TYPE_NAME: &'static str = "Fn";

    fn docks_to(&self) -> &'static [DockType] {
        &[DockType::Symbol, DockType::Exponent]
    }

    fn docking_points(&self, config: &EditorConfig) -> Vec<DockingPoint> {
        let mut points = Vec::with_capacity(4);
        if self.allow_subscript {
            points.push(subscript_point());
        }
        points.push(superscript_point());
        points.push(DockingPoint::new(Slot::Argument, &[DockType::Symbol]).expanded());
        points.push(operand_right(config));
        points
    }

    fn layout(&self, ctx: &LayoutContext<'_>, slots: &mut SlotLayout) -> Rect {
        let name = if self.custom {
            ctx.italic_box(&self.name)
        } else {
            ctx.text_box(&self.name)
        };
        let x = if self.inner_superscript {
            place_scripts(slots, name)
        } else {
            slots.place(Slot::Subscript, Point::new(name.x1, name.y1));
            name.x1 + slots.advance(Slot::Subscript)
        };
        let body = enclose_argument(ctx, slots, "(", ")", x + ctx.gap() / 2.0);
        let mut end = body.x1;
        if !self.inner_superscript {
            slots.place(Slot::Superscript, Point::new(body.x1, body.y0));
            end += slots.advance(Slot::Superscript);
        }
        place_right(ctx, slots, end);
        name.union(body)
    }

    fn format(&self, node: &NodeView<'_>, format: Format) -> String {
        let argument = node.render_child(Slot::Argument, format).unwrap_or_default();
        let body = match format {
            Format::Latex | Format::MhChem => self.latex(node, format, &argument),
            Format::Python => self.python(node, &argument),
            Format::MathMl => self.mathml(node, &argument),
            Format::Subscript => format!("{}({})", self.name, argument),
        };
        body + &continuation(node, format)
    }
}
