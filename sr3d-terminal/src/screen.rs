/// Terminal presentation of a rendered canvas
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use sr3d_core::{Canvas, Color};

/// Flush the canvas framebuffer to the terminal, one colored block per
/// pixel. Color changes are only queued when the color actually changes,
/// which keeps the command stream short for flat-shaded scenes.
pub fn present<W: Write>(canvas: &Canvas, writer: &mut W) -> std::io::Result<()> {
    let pixels = canvas.framebuffer();
    let mut current: Option<Color> = None;

    for y in 0..canvas.height() {
        writer.queue(cursor::MoveTo(0, y as u16))?;
        for x in 0..canvas.width() {
            let color = pixels[y * canvas.width() + x];
            if current != Some(color) {
                writer.queue(SetForegroundColor(to_term_color(color)))?;
                current = Some(color);
            }
            writer.queue(Print('█'))?;
        }
    }
    writer.queue(ResetColor)?;
    Ok(())
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
