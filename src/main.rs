// mask-painter: paint the region of a photo you want edited.
//
// What you SEE:
// • The photo, scaled to fit the window, is the base image.
// • Hold Left Mouse: you paint a white veil where the edit should happen.
// • [ / ] or the mouse wheel change the brush size (ring around the cursor).
// • C clears the painted mask. M toggles the black/white mask view.
// • G writes original + mask.png + prompt.txt for the inpainting service.
// • ESC quits.

mod draw;

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use draw::{Drawer, draw_crosshair, draw_ring, draw_text_5x7};
use mask_canvas::{CanvasConfig, Error, FrameBuffer, InpaintRequest, MaskCanvas, Point, SourceLimits};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mask-painter", about = "Paint an inpainting mask over an image")]
struct Args {
    /// Image to edit (PNG or JPEG).
    image: PathBuf,

    /// What should happen inside the painted region.
    #[arg(short, long)]
    prompt: String,

    /// Where G writes the request files.
    #[arg(short, long, default_value = "inpaint-request")]
    out_dir: PathBuf,

    /// Initial brush diameter in image pixels (clamped to 5..=150).
    #[arg(short, long, default_value_t = 40)]
    brush: u32,

    /// Longest window side; larger images are shown scaled down.
    #[arg(long, default_value_t = 1024)]
    max_display: u32,
}

/// Install the fmt subscriber; `RUST_LOG` overrides the `info` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

/// Fit (w,h) inside a `max` x `max` box, keeping aspect. Never upscales.
fn display_size(w: u32, h: u32, max: u32) -> (u32, u32) {
    let longest = w.max(h).max(1);
    if longest <= max {
        return (w, h);
    }
    let scale = max as f64 / longest as f64;
    let dw = ((w as f64 * scale).round() as u32).max(1);
    let dh = ((h as f64 * scale).round() as u32).max(1);
    (dw, dh)
}

/// The instruction sent with every request; blank ones are refused up front
/// so a painted mask is never lost to a bad flag.
fn validate_prompt(prompt: &str) -> Result<String, Error> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(Error::EmptyPrompt);
    }
    Ok(prompt.to_owned())
}

fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    let prompt = validate_prompt(&args.prompt)?;

    /* --- Upload ---
       Visual: nothing yet; the image is validated and decoded. */
    let original = fs::read(&args.image)?;
    let config = CanvasConfig::default()
        .with_brush(args.brush)
        .with_limits(SourceLimits::upload());
    let mut canvas = MaskCanvas::new(config);
    canvas.load_source(&original)?;
    let (w, h) = canvas.dimensions().ok_or(Error::NoSource)?;

    /* --- Window at display size ---
       Visual: the photo appears, possibly smaller than its real size.
       Mouse positions are in this space; the canvas rescales them. */
    let (dw, dh) = display_size(w, h, args.max_display.max(64));
    canvas.set_display_size(dw, dh);
    let mut drawer = Drawer::new("Mask Painter", dw as usize, dh as usize)?;
    info!(width = w, height = h, display_width = dw, display_height = dh, "editing");

    let mut base: FrameBuffer = canvas.preview_frame()?;
    let mut dirty = false;
    let mut was_down = false;
    let mut show_mask = false;
    let mut status = String::from("PAINT THE AREA TO EDIT");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let mouse = drawer.mouse_pos().map(Point::from);

        /* 1) Brush + mask keys */
        let wheel = drawer.scroll_y();
        let delta = drawer.brush_delta() + if wheel > 0.0 { 5 } else if wheel < 0.0 { -5 } else { 0 };
        if delta != 0 {
            canvas.set_brush_size(canvas.brush_size().step(delta).diameter());
        }
        if drawer.c_pressed_once() {
            canvas.clear_mask();
            status = String::from("CLEARED");
            dirty = true;
        }
        if drawer.m_pressed_once() {
            show_mask = !show_mask;
            dirty = true;
        }

        /* 2) Strokes: press begins, drag extends, release ends. */
        let down = drawer.left_mouse_down();
        match (was_down, down, mouse) {
            (false, true, Some(p)) => { canvas.begin_stroke(p); dirty = true; }
            (true, true, Some(p)) => { canvas.extend_stroke(p); dirty = true; }
            (true, false, _) => canvas.end_stroke(),
            _ => {}
        }
        was_down = down;

        /* 3) Generate: hand the request to the service (here: the out dir).
           Visual: a failure only changes the HUD; the painted mask stays. */
        if drawer.g_pressed_once() {
            let saved = InpaintRequest::from_canvas(&canvas, original.clone(), prompt.as_str())
                .and_then(|req| req.write_to_dir(&args.out_dir));
            match saved {
                Ok(_) => {
                    status = String::from("SAVED");
                    show_mask = true;
                    dirty = true;
                }
                Err(Error::EmptyMask) => {
                    warn!("nothing painted; not generating");
                    status = String::from("NOTHING PAINTED");
                }
                Err(e) => {
                    warn!("generate failed: {e}");
                    status = String::from("SAVE FAILED");
                }
            }
        }

        /* 4) Re-composite only when the layers changed. */
        if dirty {
            base = if show_mask {
                let mask = image::imageops::resize(
                    &canvas.mask_image()?,
                    dw,
                    dh,
                    image::imageops::FilterType::Nearest,
                );
                FrameBuffer::from_rgba(&mask)
            } else {
                canvas.preview_frame()?
            };
            dirty = false;
        }

        /* 5) Cursor + HUD on a copy of the composite */
        let mut screen = base.clone();
        if let Some(p) = mouse {
            let ring = canvas.brush_size().radius() * dw as f32 / w as f32;
            draw_ring(&mut screen, p.x as i32, p.y as i32, ring.round() as i32, 0x00_FF_CC_33);
            draw_crosshair(&mut screen, p.x as i32, p.y as i32, 6, 0x00_FF_CC_33);
        }
        let hud = format!(
            "BRUSH {} | [ ] SIZE  C: CLEAR  G: GENERATE  M: MASK | {}",
            canvas.brush_size().diameter(),
            status
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        drawer.present(&screen)?;
    }

    Ok(())
}
