use bytemuck::{Pod, Zeroable};
use life::Rgba;

pub const TITLE: &str = "Torus Game of Life";
const TEXT_SCALE: f32 = 3.0;
const PADDING: f32 = 20.0;
const FONT_WIDTH: usize = 5;
const FONT_HEIGHT: usize = 7;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

#[derive(Copy, Clone)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

/// Overlay triangles for one frame: the title top-left and the fps counter top-right.
pub fn build(vertices: &mut Vec<Vertex>, window_size: [f32; 2], accent: Rgba, fps: Option<u32>) {
    vertices.clear();

    draw_text(vertices, TITLE, [PADDING, PADDING], TEXT_SCALE, srgb_to_linear(accent), window_size);

    if let Some(fps) = fps {
        let text = format!("FPS {fps}");
        let width = text_pixel_width(&text) * TEXT_SCALE;
        let origin = [window_size[0] - PADDING - width, PADDING];
        draw_text(vertices, &text, origin, TEXT_SCALE, [0.0, 1.0, 0.0], window_size);
    }
}

/// Convert an 8-bit sRGB color to the linear floats an sRGB render target expects.
pub fn srgb_to_linear(color: Rgba) -> [f32; 3] {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(color[0]), channel(color[1]), channel(color[2])]
}

pub fn push_rect(vertices: &mut Vec<Vertex>, rect: Rect, color: [f32; 3], window_size: [f32; 2]) {
    let [width, height] = window_size;
    let x0 = to_ndc(rect.min[0], width);
    let y0 = to_ndc_y(rect.min[1], height);
    let x1 = to_ndc(rect.max[0], width);
    let y1 = to_ndc_y(rect.max[1], height);

    vertices.push(Vertex { position: [x0, y1], color });
    vertices.push(Vertex { position: [x1, y1], color });
    vertices.push(Vertex { position: [x0, y0], color });
    vertices.push(Vertex { position: [x0, y0], color });
    vertices.push(Vertex { position: [x1, y1], color });
    vertices.push(Vertex { position: [x1, y0], color });
}

fn to_ndc(x: f32, width: f32) -> f32 {
    (x / width) * 2.0 - 1.0
}

fn to_ndc_y(y: f32, height: f32) -> f32 {
    1.0 - (y / height) * 2.0
}

pub fn text_pixel_width(text: &str) -> f32 {
    let mut units = 0.0;
    for ch in text.to_uppercase().chars() {
        if ch == ' ' || glyph_bits(ch).is_some() {
            units += (FONT_WIDTH as f32) + 1.0;
        }
    }
    (units - 1.0).max(0.0)
}

pub fn draw_text(vertices: &mut Vec<Vertex>, text: &str, origin: [f32; 2], scale: f32, color: [f32; 3], window_size: [f32; 2]) {
    let mut cursor_x = origin[0];
    for ch in text.to_uppercase().chars() {
        if ch == ' ' {
            cursor_x += (FONT_WIDTH as f32 + 1.0) * scale;
            continue;
        }
        if let Some(rows) = glyph_bits(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..FONT_WIDTH {
                    if (bits >> (FONT_WIDTH - 1 - col)) & 1 == 1 {
                        let rect = Rect {
                            min: [cursor_x + col as f32 * scale, origin[1] + row as f32 * scale],
                            max: [cursor_x + (col as f32 + 1.0) * scale, origin[1] + (row as f32 + 1.0) * scale],
                        };
                        push_rect(vertices, rect, color, window_size);
                    }
                }
            }
            cursor_x += (FONT_WIDTH as f32 + 1.0) * scale;
        }
    }
}

fn glyph_bits(ch: char) -> Option<[u8; FONT_HEIGHT]> {
    match ch {
        'A' => Some([0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'E' => Some([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        'F' => Some([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        'G' => Some([0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
        'I' => Some([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111]),
        'L' => Some([0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
        'M' => Some([0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
        'O' => Some([0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'P' => Some([0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
        'R' => Some([0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
        'S' => Some([0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
        'T' => Some([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
        'U' => Some([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        '0' => Some([0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
        '1' => Some([0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        '2' => Some([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
        '3' => Some([0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
        '4' => Some([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
        '5' => Some([0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
        '6' => Some([0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
        '7' => Some([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
        '8' => Some([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
        '9' => Some([0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
        _ => None,
    }
}
