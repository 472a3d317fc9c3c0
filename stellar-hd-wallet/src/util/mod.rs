pub mod base32;
pub mod crc16;
pub mod hex;
pub mod securemem;
