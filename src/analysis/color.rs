use palette::{FromColor, Lab, Srgb};

/// Convert an sRGB pixel to 8-bit LAB: L scaled from 0-100 to 0-255, a and b
/// offset by 128. This is the encoding the tone anchors are expressed in.
pub fn rgb_to_lab8(rgb: [u8; 3]) -> [u8; 3] {
    let srgb = Srgb::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    );
    let lab: Lab = Lab::from_color(srgb);

    [
        saturate(lab.l * 255.0 / 100.0),
        saturate(lab.a + 128.0),
        saturate(lab.b + 128.0),
    ]
}

fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
