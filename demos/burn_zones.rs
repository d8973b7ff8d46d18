use image::{ImageBuffer, Rgb};
use kumihan::{FontSystem, Rect};

const IMAGE_WIDTH: i32 = 640;

#[allow(clippy::unwrap_used)]
fn main() {
    // 1. Setup Font System
    let font_system = FontSystem::new();
    font_system.load_system_fonts();
    let font = font_system
        .font_storage
        .lock()
        .monospace_font()
        .map(|(_, font)| font)
        .expect("a monospace system font");

    // 2. Create a layout job and add overlapping zones
    let mut composer = font_system
        .monospace_composer(IMAGE_WIDTH)
        .expect("failed to open layout job");
    composer.append_text_zone(
        Rect::new(0, 0, 200, 50),
        "a111 a11111111111 a1 a1 a1111111",
    );
    composer.append_text_zone(
        Rect::new(20, 10, 200, 50),
        "b222222 b222 b2 bsdlhfjsdhf2 b222",
    );
    composer.append_text_zone(Rect::new(260, 0, 120, 40), "open false promise");

    // 3. Place zones
    let composition = composer.compose().expect("layout failed");
    let metrics = *composer.metrics();
    println!(
        "font size {}, canvas grows by {}px",
        composition.font_size, composition.extension_height
    );

    // 4. Burn rows into an image
    let px = composition.font_size as f32;
    let ascent = font
        .horizontal_line_metrics(px)
        .map(|m| m.ascent)
        .unwrap_or(px);
    let height = composition.extension_height.max(1) as u32;
    let mut image_buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(IMAGE_WIDTH as u32, height, Rgb([0, 0, 0]));

    for zone in &composition.zones {
        let rect = zone.rect();
        for (row_index, row) in zone.rows().iter().enumerate() {
            let baseline = (rect.y + metrics.symbol_height * row_index as i32) as f32 + ascent;
            let mut pen_x = rect.x as f32;
            for ch in row.chars() {
                let (glyph, coverage) = font.rasterize(ch, px);
                let left = pen_x + glyph.xmin as f32;
                let top = baseline - (glyph.ymin as f32 + glyph.height as f32);
                for gy in 0..glyph.height {
                    for gx in 0..glyph.width {
                        let alpha = coverage[gy * glyph.width + gx];
                        let x = left as i32 + gx as i32;
                        let y = top as i32 + gy as i32;
                        if alpha == 0 || x < 0 || y < 0 {
                            continue;
                        }
                        if let Some(pixel) = image_buffer.get_pixel_mut_checked(x as u32, y as u32)
                        {
                            *pixel = Rgb([alpha, alpha, alpha]);
                        }
                    }
                }
                pen_x += glyph.advance_width;
            }
        }

        // zone frame
        for x in rect.x.max(0)..rect.right().min(IMAGE_WIDTH) {
            for y in [rect.y, rect.bottom() - 1] {
                if let Some(pixel) = image_buffer.get_pixel_mut_checked(x as u32, y.max(0) as u32) {
                    *pixel = Rgb([80, 80, 160]);
                }
            }
        }
    }

    // 5. Save Output
    std::fs::create_dir_all("debug").expect("failed to create debug directory");
    let output_path = "debug/burn_zones.png";
    image_buffer
        .save(output_path)
        .expect("failed to save image");

    println!("Saved debug image to: {}", output_path);
}
