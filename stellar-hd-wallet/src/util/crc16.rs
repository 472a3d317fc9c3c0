//! CRC-16/XMODEM
//!
//! polynomial `0x1021`, initial value `0`, no reflection, no final xor.

const POLYNOMIAL: u16 = 0x1021;

pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data.iter() {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(crc16_xmodem(b"123456789"), 0x31c3);
    }

    #[test]
    fn empty() {
        assert_eq!(crc16_xmodem(&[]), 0);
    }

    #[test]
    fn single_bit_flips_are_detected() {
        let data = b"stellar account";
        let crc = crc16_xmodem(data);
        for byte in 0..data.len() {
            for bit in 0..8 {
                let mut corrupted = data.to_vec();
                corrupted[byte] ^= 1 << bit;
                assert_ne!(crc16_xmodem(&corrupted), crc);
            }
        }
    }
}
