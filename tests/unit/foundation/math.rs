use super::*;

#[test]
fn split_writes_hash_like_one_write() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"fxcanvas");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"fx");
    b.write_bytes(b"canvas");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn empty_input_is_the_offset_basis() {
    assert_eq!(Fnv1a64::new_default().finish(), 0xcbf2_9ce4_8422_2325);
}

#[test]
fn u32_writes_are_little_endian_bytes() {
    let mut a = Fnv1a64::new_default();
    a.write_u32(0x0403_0201);
    let mut b = Fnv1a64::new_default();
    b.write_bytes(&[1, 2, 3, 4]);
    assert_eq!(a.finish(), b.finish());
}
