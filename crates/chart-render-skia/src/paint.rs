// File: crates/chart-render-skia/src/paint.rs
// Summary: Replay a chart-core `Scene` onto a Skia canvas.

use chart_core::{DrawCmd, PathCmd, PathData, PlotRect, Rgba, Scene, Stroke};
use skia_safe as skia;

use crate::text::TextShaper;

#[inline]
pub fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn rect(r: &PlotRect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
}

fn fill_paint(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color(c));
    paint
}

fn stroke_paint(s: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(s.width as f32);
    paint.set_color(color(s.color));
    if let Some([on, off]) = s.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on as f32, off as f32], 0.0));
    }
    paint
}

fn path(data: &PathData) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in &data.cmds {
        match *cmd {
            PathCmd::MoveTo(p) => { path.move_to((p.x as f32, p.y as f32)); }
            PathCmd::LineTo(p) => { path.line_to((p.x as f32, p.y as f32)); }
            PathCmd::Close => { path.close(); }
        }
    }
    path
}

/// Paint every command in order. Text is skipped when `text` is `None`.
pub fn paint_scene(canvas: &skia::Canvas, scene: &Scene, text: Option<&TextShaper>) {
    let mut clip_depth = 0usize;
    for cmd in &scene.commands {
        match cmd {
            DrawCmd::Clear(c) => { canvas.clear(color(*c)); }
            DrawCmd::Line { from, to, stroke } => {
                canvas.draw_line((from.x as f32, from.y as f32), (to.x as f32, to.y as f32), &stroke_paint(stroke));
            }
            DrawCmd::Path { path: data, fill, stroke } => {
                let p = path(data);
                if let Some(f) = fill { canvas.draw_path(&p, &fill_paint(*f)); }
                if let Some(s) = stroke { canvas.draw_path(&p, &stroke_paint(s)); }
            }
            DrawCmd::Circle { center, radius, fill, stroke } => {
                let c = (center.x as f32, center.y as f32);
                canvas.draw_circle(c, *radius as f32, &fill_paint(*fill));
                if let Some(s) = stroke { canvas.draw_circle(c, *radius as f32, &stroke_paint(s)); }
            }
            DrawCmd::Rect { rect: r, fill, stroke } => {
                if let Some(f) = fill { canvas.draw_rect(rect(r), &fill_paint(*f)); }
                if let Some(s) = stroke { canvas.draw_rect(rect(r), &stroke_paint(s)); }
            }
            DrawCmd::Text { at, text: s, size, color: c, anchor } => {
                if let Some(shaper) = text {
                    shaper.draw(canvas, s, at.x as f32, at.y as f32, *size as f32, color(*c), *anchor);
                }
            }
            DrawCmd::PushClip(r) => {
                canvas.save();
                canvas.clip_rect(rect(r), skia::ClipOp::Intersect, true);
                clip_depth += 1;
            }
            DrawCmd::PopClip => {
                if clip_depth > 0 {
                    canvas.restore();
                    clip_depth -= 1;
                }
            }
            DrawCmd::HitArea(_) => {}
        }
    }
    // Unbalanced scene: drop leftover clips.
    for _ in 0..clip_depth {
        canvas.restore();
    }
}
