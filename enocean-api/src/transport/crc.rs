/// CRC-8 used by ESP3 headers and data, polynomial x^8 + x^2 + x + 1 (0x07)
pub struct Crc8 {
    table: [u8; 256],
}

impl Crc8 {
    const POLYNOMIAL: u8 = 0x07;

    /// Creates a new CRC-8 instance with pre-computed lookup table
    pub const fn new() -> Self {
        let mut table = [0u8; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = i as u8;
            let mut bit = 0;
            while bit < 8 {
                if crc & 0x80 != 0 {
                    crc = (crc << 1) ^ Self::POLYNOMIAL;
                } else {
                    crc <<= 1;
                }
                bit += 1;
            }
            table[i] = crc;
            i += 1;
        }

        Self { table }
    }

    /// Computes CRC-8 checksum for the given data
    pub fn checksum(&self, data: &[u8]) -> u8 {
        self.update(0, data)
    }

    /// Updates CRC value with additional data (for streaming computation)
    pub fn update(&self, mut crc: u8, data: &[u8]) -> u8 {
        for &byte in data {
            crc = self.table[(crc ^ byte) as usize];
        }
        crc
    }
}

impl Default for Crc8 {
    fn default() -> Self {
        Self::new()
    }
}

/// Global CRC-8 instance with compile-time computed lookup table
static CRC8: Crc8 = Crc8::new();

/// Computes CRC-8 checksum using the global instance
pub fn crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_known_values() {
        assert_eq!(crc8(b""), 0);
        assert_eq!(crc8(b"123456789"), 0xF4);
        // ESP3 header of a 7 byte ERP1 data / 7 byte optional telegram
        assert_eq!(crc8(&[0x00, 0x07, 0x07, 0x01]), 0x7A);
    }

    #[test]
    fn test_crc8_incremental() {
        let data = b"Hello, World!";
        let full_crc = crc8(data);

        let crc8_inst = Crc8::new();
        let mut crc = 0;
        crc = crc8_inst.update(crc, &data[..5]);
        crc = crc8_inst.update(crc, &data[5..]);

        assert_eq!(full_crc, crc);
    }

    #[test]
    fn test_const_table_matches_bitwise_crc() {
        const TABLE: Crc8 = Crc8::new();

        for byte in 0..=255u8 {
            let mut crc = byte;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 { (crc << 1) ^ 0x07 } else { crc << 1 };
            }
            assert_eq!(TABLE.table[byte as usize], crc);
            assert_eq!(CRC8.table[byte as usize], crc);
        }
    }

    #[test]
    fn test_crc8_consistency() {
        let data = b"test data for consistency check";

        let crc1 = crc8(data);
        let crc8_inst = Crc8::new();
        let crc2 = crc8_inst.checksum(data);

        assert_eq!(crc1, crc2);
    }
}
