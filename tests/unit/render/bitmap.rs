use super::*;

#[test]
fn rejects_mismatched_byte_length() {
    let err = Bitmap::from_premul_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, TileError::InvalidArgument(_)));
}

#[test]
fn straight_input_is_premultiplied() {
    let b = Bitmap::from_straight_rgba8(1, 1, vec![255, 128, 0, 128]).unwrap();
    assert_eq!(b.pixel(0, 0), Some([128, 64, 0, 128]));
    assert_eq!(b.pixel(1, 0), None);
}

#[test]
fn clones_share_identity_and_filtered_copies_do_not() {
    let b = Bitmap::solid(2, 2, Rgba8::opaque(10, 20, 30)).unwrap();
    let c = b.clone();
    assert_eq!(b.id(), c.id());
    let f = b.filtered(&ColorFilter::Modulate(Rgba8::WHITE));
    assert_ne!(b.id(), f.id());
    assert_eq!(f.data(), b.data());
}

#[test]
fn image_conversion_premultiplies() {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([200, 100, 50, 255]));
    img.put_pixel(1, 0, image::Rgba([255, 255, 255, 0]));
    let b = Bitmap::from(&img);
    assert_eq!((b.width(), b.height()), (2, 1));
    assert_eq!(b.pixel(0, 0), Some([200, 100, 50, 255]));
    assert_eq!(b.pixel(1, 0), Some([0, 0, 0, 0]));
}

#[test]
fn modulate_multiplies_channels() {
    let f = ColorFilter::Modulate(Rgba8::opaque(255, 0, 255));
    assert_eq!(f.apply_premul([100, 100, 100, 255]), [100, 0, 100, 255]);
}

#[test]
fn saturation_zero_is_greyscale_and_one_is_identity() {
    let grey = ColorFilter::Matrix(ColorMatrix::saturation(0.0));
    let [r, g, b, a] = grey.apply_premul([255, 0, 0, 255]);
    assert_eq!(r, g);
    assert_eq!(g, b);
    assert_eq!(a, 255);

    let same = ColorFilter::Matrix(ColorMatrix::saturation(1.0));
    assert_eq!(same.apply_premul([12, 200, 90, 255]), [12, 200, 90, 255]);
    assert_eq!(
        ColorFilter::Matrix(ColorMatrix::IDENTITY).apply_straight(Rgba8::opaque(1, 2, 3)),
        Rgba8::opaque(1, 2, 3)
    );
}

#[test]
fn paint_samples_filtered_copy_only_while_filter_is_set() {
    let b = Bitmap::solid(1, 1, Rgba8::opaque(200, 200, 200)).unwrap();
    let mut paint = TilePaint::new(b.clone());
    assert_eq!(paint.shader().sampled().id(), b.id());

    paint.set_color_filter(Some(ColorFilter::Modulate(Rgba8::opaque(0, 255, 0))));
    assert_ne!(paint.shader().sampled().id(), b.id());
    assert_eq!(paint.shader().sampled().pixel(0, 0), Some([0, 200, 0, 255]));
    assert_eq!(paint.shader().source().id(), b.id());

    paint.set_color_filter(None);
    assert_eq!(paint.shader().sampled().id(), b.id());
    assert!(paint.color_filter().is_none());
}
