use std::path::PathBuf;

use ccl::{classify, ContainerKind, Cursor, Levelset, Variant, Writer};

fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, contents).expect("failed to write scratch file");
    path
}

#[test]
fn recognizes_every_known_magic() {
    for variant in [Variant::Ms, Variant::Lynx, Variant::MsPg, Variant::LynxPg] {
        let mut w = Writer::new();
        w.write_u32(variant.magic());
        w.write_u16(0);
        let path = scratch_file(&format!("sniff_{variant}.dat"), &w.into_bytes());
        assert_eq!(classify(&path), ContainerKind::Recognized(variant));
    }
}

#[test]
fn foreign_magic_is_alternate_not_invalid() {
    let path = scratch_file("sniff_foreign.bin", b"file: not a levelset\n");
    assert_eq!(classify(&path), ContainerKind::Alternate);
}

#[test]
fn short_file_is_unreadable() {
    let path = scratch_file("sniff_short.bin", &[0xAC, 0xAA]);
    assert_eq!(classify(&path), ContainerKind::Unreadable);
}

#[test]
fn missing_file_is_unreadable() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("does_not_exist.dat");
    assert_eq!(classify(&path), ContainerKind::Unreadable);
}

#[test]
fn classify_agrees_with_the_reader() {
    let mut set = Levelset::new(1);
    set.set_variant(Variant::LynxPg);
    let mut w = Writer::new();
    set.write(&mut w);
    let bytes = w.into_bytes();

    let path = scratch_file("sniff_real_set.dat", &bytes);
    assert_eq!(classify(&path), ContainerKind::Recognized(Variant::LynxPg));

    let reread = Levelset::read(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(reread.variant(), Variant::LynxPg);
}
