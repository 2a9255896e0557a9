use imgsize_io::{read, write, Format, ImageData, IoError, PixelData, WriteOptions};
use tempfile::tempdir;

fn checker(width: u32, height: u32) -> ImageData {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 4 + y / 4) % 2 == 0 { 230 } else { 20 };
            data.extend_from_slice(&[v, v / 2, 255 - v]);
        }
    }
    ImageData::from_u8(width, height, 3, data)
}

#[test]
fn png_write_then_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("checker.png");
    let image = checker(40, 30);

    write(&path, &image, &WriteOptions::default()).expect("write png");
    let loaded = read(&path).expect("read png");
    assert_eq!(loaded, image);
}

#[test]
fn jpeg_write_then_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("checker.JPEG");

    write(&path, &checker(40, 30), &WriteOptions { jpeg_quality: 75 }).expect("write jpeg");
    let loaded = read(&path).expect("read jpeg");
    assert_eq!(loaded.dimensions(), (40, 30));
    assert_eq!(loaded.channels, 3);
    assert!(matches!(loaded.data, PixelData::U8(_)));
}

#[test]
fn read_detects_content_not_extension() {
    let dir = tempdir().unwrap();
    let png_path = dir.path().join("real.png");
    write(&png_path, &checker(8, 8), &WriteOptions::default()).unwrap();

    let misnamed = dir.path().join("misnamed.jpg");
    std::fs::copy(&png_path, &misnamed).unwrap();
    assert_eq!(Format::detect(&misnamed).unwrap(), Format::Png);
    assert_eq!(read(&misnamed).unwrap(), checker(8, 8));
}

#[test]
fn overwrite_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.png");
    std::fs::write(&path, b"old contents").unwrap();

    write(&path, &checker(16, 16), &WriteOptions::default()).unwrap();
    assert_eq!(read(&path).unwrap().dimensions(), (16, 16));

    // Only the destination remains, no temporary files
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("out.png")]);
}

#[test]
fn corrupt_source_is_decode_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x43, 0x00]).unwrap();

    match read(&path) {
        Err(IoError::DecodeError(_)) => {}
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn unknown_source_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello world").unwrap();

    assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(ref e)) if e == "txt"));
}
