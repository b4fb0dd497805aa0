use super::*;

#[test]
fn u8_roundtrip_is_exact() {
    for v in 0..=255u8 {
        assert_eq!(u8::from_normalized(v.to_normalized()), v);
    }
}

#[test]
fn u16_roundtrip_is_exact_over_host_range() {
    for v in 0..=32767u16 {
        assert_eq!(u16::from_normalized(v.to_normalized()), v);
    }
    assert_eq!(u16::from_normalized(32768.0), 32768);
}

#[test]
fn f32_is_pass_through() {
    for v in [-3.5f32, 0.0, 0.25, 1.0, 7.75] {
        assert_eq!(f32::from_normalized(v.to_normalized()), v);
    }
}

#[test]
fn integer_formats_round_half_up_and_clamp() {
    assert_eq!(u8::from_normalized(10.49), 10);
    assert_eq!(u8::from_normalized(10.5), 11);
    assert_eq!(u8::from_normalized(-4.0), 0);
    assert_eq!(u8::from_normalized(300.0), 255);
    assert_eq!(u8::from_normalized(f32::NAN), 0);

    assert_eq!(u16::from_normalized(99.5), 100);
    assert_eq!(u16::from_normalized(40000.0), 32768);
    assert_eq!(u16::from_normalized(-1.0), 0);
}

#[test]
fn bytes_per_pixel_match_channel_sizes() {
    assert_eq!(
        PixelFormat::Byte8.bytes_per_pixel(),
        4 * std::mem::size_of::<u8>()
    );
    assert_eq!(
        PixelFormat::Word16.bytes_per_pixel(),
        4 * std::mem::size_of::<u16>()
    );
    assert_eq!(
        PixelFormat::Float32.bytes_per_pixel(),
        4 * std::mem::size_of::<f32>()
    );
    assert_eq!(<u16 as Channel>::FORMAT, PixelFormat::Word16);
}

#[test]
fn pixel_channel_order_is_argb() {
    let mut buf = [0u8; 4];
    Pixel::new(1u8, 2, 3, 4).write_channels(&mut buf);
    assert_eq!(buf, [1, 2, 3, 4]);
    let p = Pixel::<u8>::from_channels(&buf);
    assert_eq!(p.alpha, 1);
    assert_eq!(p.blue, 4);
}

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = Pixel::new(0.0f32, 10.0, 20.0, 30.0);
    let b = Pixel::new(255.0f32, 30.0, 20.0, 10.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    let m = a.lerp(b, 0.5);
    assert_eq!(m, Pixel::new(127.5, 20.0, 20.0, 20.0));
}

#[test]
fn normalized_roundtrip_through_pixel() {
    let p = Pixel::new(255u8, 0, 128, 7);
    assert_eq!(Pixel::<u8>::from_normalized(p.normalized()), p);
}

#[test]
fn integer_clamp_uses_the_channel_ceiling() {
    assert_eq!(<u16 as Channel>::from_normalized(40000.0), 32768);
    assert_eq!(<u16 as Channel>::from_normalized(65535.0), 32768);
    assert_eq!(<u8 as Channel>::from_normalized(255.4), 255);
    assert_eq!(<u16 as Channel>::MAX, 32768.0);
}
