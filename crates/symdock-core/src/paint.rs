//! Painting traversal. The drawing primitives themselves belong to the host.

use crate::config::LogicSyntax;
use crate::forest::Forest;
use crate::widgets::{WidgetId, WidgetKind};
use kurbo::{Point, Rect, Vec2};
use serde::Serialize;

/// Drawing primitives a host provides.
pub trait Painter {
    /// Draw `text` filling `bounds` at the given font size.
    fn text(&mut self, text: &str, bounds: Rect, size: f64, italic: bool);

    fn line(&mut self, from: Point, to: Point, width: f64);

    /// Marker for an empty docking point.
    fn docking_point(&mut self, center: Point, size: f64, highlighted: bool);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintCommand {
    Text {
        text: String,
        bounds: Rect,
        size: f64,
        italic: bool,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
    },
    DockingPoint {
        center: Point,
        size: f64,
        highlighted: bool,
    },
}

/// A painter that records its calls, for headless hosts and tests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayList {
    pub commands: Vec<PaintCommand>,
}

impl Painter for DisplayList {
    fn text(&mut self, text: &str, bounds: Rect, size: f64, italic: bool) {
        self.commands.push(PaintCommand::Text {
            text: text.to_string(),
            bounds,
            size,
            italic,
        });
    }

    fn line(&mut self, from: Point, to: Point, width: f64) {
        self.commands.push(PaintCommand::Line { from, to, width });
    }

    fn docking_point(&mut self, center: Point, size: f64, highlighted: bool) {
        self.commands.push(PaintCommand::DockingPoint {
            center,
            size,
            highlighted,
        });
    }
}

impl Forest {
    /// Paint every root, back to front.
    pub fn paint(&self, painter: &mut dyn Painter) {
        for &root in self.roots() {
            self.paint_widget(root, painter);
        }
    }

    /// Paint a widget and its subtree. Children are painted after their parent.
    pub fn paint_widget(&self, id: WidgetId, painter: &mut dyn Painter) {
        let (Some(widget), Some(origin)) = (self.get(id), self.absolute_position(id)) else {
            return;
        };
        let size = self.config().base_font_size() * widget.scale;
        let stroke = (size / 20.0).max(1.0);
        let bounds = widget.bounds() + origin.to_vec2();
        let syntax = self.config().logic_syntax;
        let glyph_box = |text: &str| {
            let r = self.metrics().text_bounds(text, size);
            Rect::new(bounds.x0, bounds.center().y - r.height() / 2.0, bounds.x0 + r.width(), bounds.center().y + r.height() / 2.0)
        };

        match &widget.kind {
            WidgetKind::Symbol(symbol) => painter.text(&symbol.display(), bounds, size, true),
            WidgetKind::Num(number) => painter.text(&number.significand, bounds, size, false),
            WidgetKind::BinaryOperation(op) => painter.text(op.glyph(), bounds, size, false),
            WidgetKind::Relation(relation) => painter.text(relation.glyph(), bounds, size, false),
            WidgetKind::LogicBinaryOperation(op) => {
                painter.text(op.operation.glyph(syntax), bounds, size, false)
            }
            WidgetKind::Fraction(_) | WidgetKind::Derivative(_) => {
                let y = bounds.center().y;
                painter.line(Point::new(bounds.x0, y), Point::new(bounds.x1, y), stroke);
            }
            WidgetKind::Brackets(brackets) => {
                let (open, close) = brackets.kind.glyphs();
                let close_width = self.metrics().text_bounds(close, size).width();
                painter.text(open, glyph_box(open), size, false);
                let close_box = glyph_box(close) + Vec2::new(bounds.width() - close_width, 0.0);
                painter.text(close, close_box, size, false);
            }
            WidgetKind::AbsoluteValue(_) => {
                for x in [bounds.x0 + stroke, bounds.x1 - stroke] {
                    painter.line(Point::new(x, bounds.y0), Point::new(x, bounds.y1), stroke);
                }
            }
            WidgetKind::Radix(_) => {
                let sign = glyph_box("√");
                painter.text("√", sign, size, false);
                painter.line(Point::new(sign.x1, bounds.y0), Point::new(bounds.x1, bounds.y0), stroke);
            }
            WidgetKind::Fn(function) => {
                painter.text(&function.name, glyph_box(&function.name), size, function.custom)
            }
            WidgetKind::Differential(differential) => {
                painter.text(&differential.letter, bounds, size, false)
            }
            WidgetKind::LogicNot(_) => match syntax {
                LogicSyntax::Logic => painter.text("¬", glyph_box("¬"), size, false),
                LogicSyntax::Binary => {
                    let y = bounds.y0 + stroke;
                    painter.line(Point::new(bounds.x0, y), Point::new(bounds.x1, y), stroke);
                }
            },
            WidgetKind::LogicLiteral(literal) => painter.text(literal.glyph(syntax), bounds, size, false),
            WidgetKind::ChemicalElement(element) => painter.text(&element.element, bounds, size, false),
            WidgetKind::StateSymbol(state) => painter.text(&state.text(), bounds, size, false),
            WidgetKind::Particle(particle) => painter.text(particle.particle.glyph(), bounds, size, true),
        }

        for dp in widget.docking_points() {
            match dp.child() {
                Some(child) => self.paint_widget(child, painter),
                None if dp.visible || dp.must_expand => {
                    let marker = size * dp.scale / 3.0;
                    painter.docking_point(origin + dp.position.to_vec2(), marker, dp.visible);
                }
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::docking::Slot;
    use crate::widgets::{Fraction, Number, Symbol, WidgetTrait};

    #[test]
    fn test_paint_symbol_with_exponent() {
        let mut f = Forest::new(EditorConfig::default());
        let x = f.insert(Symbol::new("x"));
        f.add_root(x);
        let two = f.insert(Number::new("2"));
        f.dock(two, x, Slot::Superscript).unwrap();

        let mut list = DisplayList::default();
        f.paint(&mut list);
        let texts: Vec<(&str, f64)> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { text, size, .. } => Some((text.as_str(), *size)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].0, "x");
        assert_eq!(texts[1].0, "2");
        assert!(texts[1].1 < texts[0].1);
    }

    #[test]
    fn test_paint_empty_fraction_shows_placeholders() {
        let mut f = Forest::new(EditorConfig::default());
        let frac = f.insert(Fraction::default());
        f.add_root(frac);
        let mut list = DisplayList::default();
        f.paint(&mut list);
        let markers = list
            .commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::DockingPoint { .. }))
            .count();
        // numerator and denominator; the plain right slot stays hidden
        assert_eq!(markers, 2);
        assert!(list.commands.iter().any(|c| matches!(c, PaintCommand::Line { .. })));
    }

    #[test]
    fn test_highlighted_points_are_drawn() {
        let mut f = Forest::new(EditorConfig::default());
        let x = f.insert(Symbol::new("x"));
        f.add_root(x);
        f.highlight_docking_points(Number::new("2").docks_to());
        let mut list = DisplayList::default();
        f.paint(&mut list);
        let highlighted = list
            .commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::DockingPoint { highlighted: true, .. }))
            .count();
        // superscript, subscript and right all accept a number
        assert_eq!(highlighted, 3);
    }
}
