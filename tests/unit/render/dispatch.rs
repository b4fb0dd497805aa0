use super::*;
use crate::foundation::core::Direction;
use crate::pixel::buffer::Image;
use crate::pixel::channel::Pixel;
use crate::render::render_same_size;

fn layout(width: usize, row_bytes: usize, deep: bool) -> LayerLayout {
    LayerLayout {
        width,
        height: 4,
        row_bytes,
        deep,
    }
}

fn params() -> StretchParams {
    StretchParams {
        anchor: [2, 2],
        angle_deg: 20.0,
        shift: 3.0,
        direction: Direction::Both,
        ..StretchParams::default()
    }
}

fn gradient<C: Channel>(to_channel: impl Fn(usize) -> C) -> Image<C> {
    let mut img = Image::new(5, 4).unwrap();
    for y in 0..4 {
        for x in 0..5 {
            let v = to_channel(x * 4 + y);
            img.set_pixel(x, y, Pixel::new(to_channel(20), v, to_channel(x), to_channel(y)));
        }
    }
    img
}

#[test]
fn format_detection_table() {
    assert_eq!(PixelFormat::detect(&layout(10, 40, false)), PixelFormat::Byte8);
    assert_eq!(PixelFormat::detect(&layout(10, 80, true)), PixelFormat::Word16);
    assert_eq!(PixelFormat::detect(&layout(10, 160, true)), PixelFormat::Float32);
    assert_eq!(PixelFormat::detect(&layout(10, 120, true)), PixelFormat::Word16);
    assert_eq!(PixelFormat::detect(&layout(0, 0, true)), PixelFormat::Byte8);
    // Row padding smaller than a pixel does not change the answer.
    assert_eq!(PixelFormat::detect(&layout(10, 88, true)), PixelFormat::Word16);
}

#[test]
fn packed_layout_matches_format() {
    let l = LayerLayout::packed(7, 3, PixelFormat::Float32);
    assert_eq!(l.row_bytes, 7 * 16);
    assert!(l.deep);
    assert_eq!(PixelFormat::detect(&l), PixelFormat::Float32);
    assert!(!LayerLayout::packed(7, 3, PixelFormat::Byte8).deep);
}

#[test]
fn byte_layers_render_like_typed_images() {
    let src = gradient(|v| (v * 12) as u8);
    let expected = render_same_size(src.as_view(), &params(), &RenderSettings::default()).unwrap();

    let l = LayerLayout::packed(5, 4, PixelFormat::Byte8);
    let mut out = vec![0u8; src.data().len()];
    let format = render_raw(
        RawLayer {
            layout: l,
            data: src.data(),
        },
        RawLayerMut {
            layout: l,
            data: &mut out,
        },
        &params(),
        Origin::default(),
        &RenderSettings::default(),
    )
    .unwrap();
    assert_eq!(format, PixelFormat::Byte8);
    assert_eq!(out, expected.data());
}

#[test]
fn misaligned_deep_layers_render_through_a_copy() {
    let src = gradient(|v| (v * 1500) as u16);
    let expected = render_same_size(src.as_view(), &params(), &RenderSettings::default()).unwrap();

    // Offset by one byte so the u16 view cannot be borrowed in place.
    let src_bytes: &[u8] = bytemuck::cast_slice(src.data());
    let mut src_storage = vec![0u8; src_bytes.len() + 1];
    src_storage[1..].copy_from_slice(src_bytes);
    let mut dst_storage = vec![0u8; src_bytes.len() + 1];

    let l = LayerLayout::packed(5, 4, PixelFormat::Word16);
    let format = render_raw(
        RawLayer {
            layout: l,
            data: &src_storage[1..],
        },
        RawLayerMut {
            layout: l,
            data: &mut dst_storage[1..],
        },
        &params(),
        Origin::default(),
        &RenderSettings::default(),
    )
    .unwrap();
    assert_eq!(format, PixelFormat::Word16);
    let expected_bytes: &[u8] = bytemuck::cast_slice(expected.data());
    assert_eq!(&dst_storage[1..], expected_bytes);
}

#[test]
fn float_layers_use_the_float_specialization() {
    let src = gradient(|v| v as f32 * 0.05);
    let expected = render_same_size(src.as_view(), &params(), &RenderSettings::default()).unwrap();

    let l = LayerLayout::packed(5, 4, PixelFormat::Float32);
    let src_bytes: Vec<u8> = bytemuck::cast_slice(src.data()).to_vec();
    let mut out = vec![0u8; src_bytes.len()];
    let format = render_raw(
        RawLayer {
            layout: l,
            data: &src_bytes,
        },
        RawLayerMut {
            layout: l,
            data: &mut out,
        },
        &params(),
        Origin::default(),
        &RenderSettings::default(),
    )
    .unwrap();
    assert_eq!(format, PixelFormat::Float32);
    let got: Vec<f32> = bytemuck::pod_collect_to_vec(&out);
    assert_eq!(got, expected.data());
}

#[test]
fn padded_rows_are_honored() {
    let src = gradient(|v| (v * 12) as u8);
    let expected = render_same_size(src.as_view(), &params(), &RenderSettings::default()).unwrap();

    // 5 pixels per row plus 3 pixels of padding.
    let row_bytes = 8 * 4;
    let mut src_padded = vec![0xAAu8; row_bytes * 4];
    for y in 0..4 {
        src_padded[y * row_bytes..][..20].copy_from_slice(&src.data()[y * 20..][..20]);
    }
    let mut out = vec![0x55u8; row_bytes * 4];
    let l = layout(5, row_bytes, false);
    render_raw(
        RawLayer {
            layout: l,
            data: &src_padded,
        },
        RawLayerMut {
            layout: l,
            data: &mut out,
        },
        &params(),
        Origin::default(),
        &RenderSettings::default(),
    )
    .unwrap();
    for y in 0..4 {
        assert_eq!(&out[y * row_bytes..][..20], &expected.data()[y * 20..][..20]);
        assert!(out[y * row_bytes + 20..][..12].iter().all(|&b| b == 0x55));
    }
}

#[test]
fn malformed_layers_are_rejected() {
    let data = vec![0u8; 256];
    let mut out = vec![0u8; 256];

    let err = render_raw(
        RawLayer {
            layout: layout(2, 17, true),
            data: &data,
        },
        RawLayerMut {
            layout: layout(2, 17, true),
            data: &mut out,
        },
        &params(),
        Origin::default(),
        &RenderSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, StretchError::Validation(_)));

    let err = render_raw(
        RawLayer {
            layout: layout(2, 16, true),
            data: &data,
        },
        RawLayerMut {
            layout: layout(2, 8, false),
            data: &mut out,
        },
        &params(),
        Origin::default(),
        &RenderSettings::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("destination"));

    let err = render_raw(
        RawLayer {
            layout: layout(4, 16, false),
            data: &data[..20],
        },
        RawLayerMut {
            layout: layout(4, 16, false),
            data: &mut out,
        },
        &params(),
        Origin::default(),
        &RenderSettings::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("buffer too short"));
}
