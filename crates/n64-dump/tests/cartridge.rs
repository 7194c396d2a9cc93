use pretty_assertions::assert_eq;

use n64_dump::checksum;
use n64_dump::rom::{MAX_ROM_SIZE, MIN_ROM_SIZE};
use n64_dump::{ByteOrder, Cic, Rom, RomError};
use vr4300_rs::scan::ScanError;
use vr4300_rs::{Halt, ScanConfig, BOOTCODE_END};

const ALL_ONES: u32 = 0xFFFF_FFFF;

fn put(img: &mut [u8], off: usize, w: u32) {
    img[off..off + 4].copy_from_slice(&w.to_be_bytes());
}

/// Native-order image with a short program after the boot code and a
/// header checksum valid for `cic`.
fn cartridge(cic: Cic, pc: u32, country: u8) -> Vec<u8> {
    let mut img = vec![0u8; MIN_ROM_SIZE];
    put(&mut img, 0x00, 0x8037_1240);
    put(&mut img, 0x08, pc);
    img[0x20..0x34].copy_from_slice(b"TEST CART           ");
    img[0x3B] = b'N';
    img[0x3C..0x3E].copy_from_slice(b"TC");
    img[0x3E] = country;
    let program = [
        0x3C08_8000, // lui
        0x0810_0100, // j
        0x0000_0000,
        0x1000_FFFD, // b
        0x0000_0000,
        ALL_ONES,
    ];
    for (i, w) in program.iter().enumerate() {
        put(&mut img, BOOTCODE_END as usize + i * 4, *w);
    }
    let (crc1, crc2) = checksum::checksum(&img, cic).unwrap();
    put(&mut img, 0x10, crc1);
    put(&mut img, 0x14, crc2);
    img
}

fn swap_halfwords(img: &[u8]) -> Vec<u8> {
    img.chunks_exact(2).flat_map(|c| [c[1], c[0]]).collect()
}

#[test]
fn verified_cartridge_scans_to_boundary() {
    let rom = Rom::from_bytes(cartridge(Cic::Nus6102, 0x8000_0400, 0x45)).unwrap();
    assert_eq!(rom.order, ByteOrder::Native);
    assert_eq!(rom.header.title, "TEST CART");
    rom.verify(Cic::Nus6102).unwrap();

    let cfg = rom.scan_config(Cic::Nus6102);
    assert_eq!(cfg.entry_pc, 0x8000_0400);
    assert_eq!(cfg.start_offset, 0x1000);

    let mut listing = Vec::new();
    let rep = rom.find_binary(cfg, &mut listing).unwrap();
    assert_eq!(rep.accepted, 5);
    assert_eq!(rep.jump_count, 1);
    assert_eq!(rep.branch_count, 1);
    assert_eq!(rep.boundary_offset, 0x1010);
    assert_eq!(rep.binary_start, 0x1014);
    assert!(matches!(rep.halt, Halt::Rejected { offset: 0x1014, word: ALL_ONES, .. }));

    let text = String::from_utf8(listing).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert_eq!(text.lines().nth(3), Some("0x8000040C beq      $zero, $zero, 0x80000404"));
}

#[test]
fn byte_swapped_image_verifies_after_normalization() {
    let native = cartridge(Cic::Nus6102, 0x8000_0400, 0x45);
    let rom = Rom::from_bytes(swap_halfwords(&native)).unwrap();
    assert_eq!(rom.order, ByteOrder::ByteSwapped);
    assert_eq!(rom.data(), native.as_slice());
    rom.verify(Cic::Nus6102).unwrap();
}

#[test]
fn entry_point_follows_boot_code() {
    let rom = Rom::from_bytes(cartridge(Cic::Nus6103, 0x8010_0400, 0x45)).unwrap();
    rom.verify(Cic::Nus6103).unwrap();
    assert_eq!(rom.scan_config(Cic::Nus6103).entry_pc, 0x8000_0400);

    let mut listing = Vec::new();
    let rep = rom.find_binary(rom.scan_config(Cic::Nus6103), &mut listing).unwrap();
    assert!(String::from_utf8(listing).unwrap().starts_with("0x80000400 lui"));
    assert_eq!(rep.binary_start, 0x1014);
}

#[test]
fn wrong_seed_is_a_checksum_mismatch() {
    let rom = Rom::from_bytes(cartridge(Cic::Nus6102, 0x8000_0400, 0x45)).unwrap();
    let err = rom.verify(Cic::Nus6105).unwrap_err();
    assert!(matches!(err, RomError::ChecksumMismatch { which: 1, .. }));
}

#[test]
fn header_checks_run_before_checksum() {
    let rom = Rom::from_bytes(cartridge(Cic::Nus6102, 0x8000_0400, 0x00)).unwrap();
    assert!(matches!(rom.verify(Cic::Nus6102), Err(RomError::BadCountry(0x00))));

    let mut img = cartridge(Cic::Nus6102, 0x8000_0400, 0x45);
    img[0x3B] = b'X';
    let rom = Rom::from_bytes(img).unwrap();
    assert!(matches!(rom.verify(Cic::Nus6102), Err(RomError::BadMediaFormat(b'X'))));
}

#[test]
fn blank_boot_code_is_unknown() {
    let rom = Rom::from_bytes(cartridge(Cic::Nus6102, 0x8000_0400, 0x45)).unwrap();
    let crc = checksum::crc32(&[0u8; 0x1000 - 0x40]);
    assert!(matches!(rom.cic(None), Err(RomError::UnknownBootcode(c)) if c == crc));
    assert_eq!(rom.cic(Some(Cic::Nus6106)).unwrap(), Cic::Nus6106);
}

#[test]
fn japanese_title_is_shift_jis() {
    let mut img = cartridge(Cic::Nus6102, 0x8000_0400, 0x4A);
    img[0x20..0x34].copy_from_slice(&[0xB6, 0xDE, b'6', b'4', 0x82, 0xA0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let rom = Rom::from_bytes(img).unwrap();
    assert_eq!(rom.header.title, "\u{FF76}\u{FF9E}64\u{FFFD}");
    assert_eq!(rom.header.country_name(), Some("Japanese"));
}

#[test]
fn size_and_format_bounds() {
    assert!(matches!(Rom::from_bytes(vec![0u8; MIN_ROM_SIZE - 4]), Err(RomError::TooSmall(_))));
    assert!(matches!(Rom::from_bytes(vec![0u8; MAX_ROM_SIZE + 4]), Err(RomError::TooBig(_))));
    assert!(matches!(Rom::from_bytes(vec![0u8; MIN_ROM_SIZE]), Err(RomError::UnknownFormat(0))));
}

#[test]
fn bad_header_fails_before_boot_code_lookup() {
    let mut img = cartridge(Cic::Nus6102, 0x8000_0400, 0x00);
    img[0x3B] = b'X';
    let rom = Rom::from_bytes(img).unwrap();
    assert!(matches!(rom.checked_cic(None, true), Err(RomError::BadCountry(0x00))));
    assert!(matches!(rom.checked_cic(Some(Cic::Nus6102), true), Err(RomError::BadCountry(0x00))));
    // skipping the checks leaves only the lookup, which finds nothing
    assert!(matches!(rom.checked_cic(None, false), Ok(None)));
}

#[test]
fn unknown_boot_code_fails_checked_lookup() {
    let rom = Rom::from_bytes(cartridge(Cic::Nus6102, 0x8000_0400, 0x45)).unwrap();
    assert!(matches!(rom.checked_cic(None, true), Err(RomError::UnknownBootcode(_))));
    assert_eq!(rom.checked_cic(Some(Cic::Nus6102), true).unwrap(), Some(Cic::Nus6102));
    assert!(matches!(
        rom.checked_cic(Some(Cic::Nus6106), true),
        Err(RomError::ChecksumMismatch { .. })
    ));
    assert_eq!(rom.checked_cic(Some(Cic::Nus6106), false).unwrap(), Some(Cic::Nus6106));
}

#[test]
fn misaligned_start_is_refused() {
    let rom = Rom::from_bytes(cartridge(Cic::Nus6102, 0x8000_0400, 0x45)).unwrap();
    let cfg = ScanConfig { start_offset: BOOTCODE_END + 2, ..rom.scan_config(Cic::Nus6102) };
    let mut listing = Vec::new();
    let err = rom.find_binary(cfg, &mut listing).unwrap_err();
    assert!(matches!(err, RomError::Scan(ScanError::Misaligned(0x1002))));
    assert!(listing.is_empty());
}
