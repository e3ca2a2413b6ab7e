/// CRC-16/CCITT-FALSE polynomial
const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

/// 16-bit CCITT CRC (poly `0x1021`, initial value `0xFFFF`, unreflected, no final XOR)
pub fn ccitt(data: &[u8]) -> u16 {
    data.iter().fold(INIT, |crc, &byte| {
        (0..8).fold(crc ^ (u16::from(byte) << 8), |crc, _| {
            if crc & 0x8000 == 0 {
                crc << 1
            } else {
                (crc << 1) ^ POLY
            }
        })
    })
}
