use super::*;
use crate::pixel::buffer::Image;

fn ramp_4x3() -> Image<u8> {
    let mut img = Image::new(4, 3).unwrap();
    for y in 0..3 {
        for x in 0..4 {
            let v = (y * 40 + x * 10) as u8;
            img.set_pixel(x, y, Pixel::new(255, v, 255 - v, 7));
        }
    }
    img
}

#[test]
fn rows_above_and_below_source_are_empty() {
    let img = ramp_4x3();
    let view = img.as_view();

    let above = RowSampler::new(view, -0.5);
    let px = above.sample_bilinear(1.0);
    assert!((px.alpha - 127.5).abs() < 1e-4);
    assert!((px.red - 10.0).abs() < 1e-4);

    let below = RowSampler::new(view, 2.5);
    let px = below.sample_bilinear(2.0);
    assert!((px.alpha - 127.5).abs() < 1e-4);
    assert!((px.red - 100.0).abs() < 1e-4);

    let far = RowSampler::new(view, 40.0);
    assert_eq!(far.sample_bilinear(1.0), Pixel::transparent());
    assert_eq!(far.sample_nearest(1.0), Pixel::transparent());
}

#[test]
fn repeated_x_samples_match_fresh_samplers() {
    let img = ramp_4x3();
    let view = img.as_view();
    let y = 1.375;
    let row = RowSampler::new(view, y);
    for i in -6..30 {
        let x = f64::from(i) * 0.17;
        for interp in [Interpolation::Nearest, Interpolation::Bilinear] {
            assert_eq!(
                row.sample(interp, x),
                RowSampler::new(view, y).sample(interp, x)
            );
        }
    }
}

#[test]
fn vertical_weights_follow_fraction() {
    let img = ramp_4x3();
    let row = RowSampler::new(img.as_view(), 0.25);
    let px = row.sample_bilinear(0.0);
    // rows 0 and 1 at x = 0: red 0 and 40.
    assert!((px.red - 10.0).abs() < 1e-4);
    assert!((px.alpha - 255.0).abs() < 1e-4);
}
