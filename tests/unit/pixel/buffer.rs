use super::*;

fn padded_2x2() -> Vec<u8> {
    vec![
        1, 2, 3, 4, 5, 6, 7, 8, 99, 99, // row 0 + padding
        9, 10, 11, 12, 13, 14, 15, 16, // row 1, no trailing padding
    ]
}

#[test]
fn view_indexing_with_stride() {
    let data = padded_2x2();
    let view = ImageView::from_slice(2, 2, 10, &data).expect("valid view");

    assert_eq!(view.row(0), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(view.row(1), &[9, 10, 11, 12, 13, 14, 15, 16]);
    assert_eq!(view.pixel(1, 1), Some(Pixel::new(13, 14, 15, 16)));
    assert_eq!(view.pixel(2, 1), None);
    assert_eq!(view.pixel_at(-1, 0), None);
    assert_eq!(view.row_at(2), None);
    assert!(!view.is_contiguous());
}

#[test]
fn layout_errors_are_validation_errors() {
    let data = padded_2x2();
    let err = ImageView::from_slice(2, 2, 7, &data).unwrap_err();
    assert!(err.to_string().contains("invalid stride"));

    let err = ImageView::from_slice(2, 3, 10, &data).unwrap_err();
    assert!(err.to_string().contains("buffer too short"));

    assert!(Image::<u8>::from_vec(2, 2, vec![0; 15]).is_err());
}

#[test]
fn fill_leaves_padding_untouched() {
    let mut data = padded_2x2();
    let mut view = ImageViewMut::from_slice_mut(2, 2, 10, &mut data).expect("valid view");
    view.fill(Pixel::transparent());
    assert_eq!(&data[8..10], &[99, 99]);
    assert!(data[..8].iter().all(|&c| c == 0));
    assert!(data[10..].iter().all(|&c| c == 0));
}

#[test]
fn split_rows_covers_every_row_once() {
    let mut img = Image::<u16>::new(3, 7).unwrap();
    let bands = img.as_view_mut().split_rows(3);
    let firsts: Vec<usize> = bands.iter().map(|(first, _)| *first).collect();
    let heights: Vec<usize> = bands.iter().map(|(_, b)| b.height()).collect();
    assert_eq!(firsts, vec![0, 3, 6]);
    assert_eq!(heights, vec![3, 3, 1]);

    for (first, mut band) in bands {
        for y in 0..band.height() {
            band.row_mut(y)[0] = (first + y) as u16;
        }
    }
    for y in 0..7 {
        assert_eq!(img.pixel(0, y).unwrap().alpha, y as u16);
    }
}

#[test]
fn split_rows_handles_short_last_row() {
    let mut data = padded_2x2();
    let view = ImageViewMut::from_slice_mut(2, 2, 10, &mut data).expect("valid view");
    let bands = view.split_rows(1);
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[1].1.row(0), &[9, 10, 11, 12, 13, 14, 15, 16]);
}

#[test]
fn owned_image_set_and_get() {
    let mut img = Image::filled(2, 2, Pixel::new(255u8, 1, 2, 3)).unwrap();
    assert!(img.set_pixel(1, 0, Pixel::new(0, 0, 0, 9)));
    assert!(!img.set_pixel(2, 0, Pixel::transparent()));
    assert_eq!(img.pixel(1, 0).unwrap().blue, 9);
    assert_eq!(img.pixel(0, 1), Some(Pixel::new(255, 1, 2, 3)));
    assert!(img.as_view().is_contiguous());
}
