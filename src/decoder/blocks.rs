/// Codeword de-interleaving and per-block Reed-Solomon correction
use log::trace;

use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::decoder::tables::BlockLayout;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Version};

/// Turn the raw traversal bits of a symbol into its corrected data bits.
///
/// The trailing remainder bits must be zero. Every block is corrected on its own
/// and the data codewords are concatenated in block order.
pub fn correct(raw: &[bool], version: Version, ec_level: ECLevel) -> Result<Vec<bool>> {
    let layout = version.block_layout(ec_level);
    let expected = layout.total_codewords() * 8 + version.remainder_bits();
    if raw.len() != expected {
        return Err(QrError::DataLength {
            expected,
            found: raw.len(),
        });
    }

    let (codeword_bits, padding) = raw.split_at(layout.total_codewords() * 8);
    if padding.iter().any(|&bit| bit) {
        return Err(QrError::NonZeroPadding {
            bits: padding.len(),
        });
    }

    let data = deinterleave_and_correct(&bits_to_codewords(codeword_bits), &layout)?;
    Ok(codewords_to_bits(&data))
}

/// Split interleaved codewords into blocks, correct each, and return the data codewords.
pub fn deinterleave_and_correct(codewords: &[u8], layout: &BlockLayout) -> Result<Vec<u8>> {
    if codewords.len() != layout.total_codewords() {
        return Err(QrError::DataLength {
            expected: layout.total_codewords() * 8,
            found: codewords.len() * 8,
        });
    }

    let num_blocks = layout.block_count();
    let long_len = layout.short_data + 1;
    let mut blocks: Vec<Vec<u8>> = (0..num_blocks)
        .map(|_| Vec::with_capacity(long_len + layout.ec_per_block))
        .collect();

    let mut stream = codewords.iter().copied();
    for i in 0..long_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < layout.data_len(b) {
                block.extend(stream.next());
            }
        }
    }
    for _ in 0..layout.ec_per_block {
        for block in blocks.iter_mut() {
            block.extend(stream.next());
        }
    }

    let rs = ReedSolomonDecoder::new(layout.ec_per_block);
    let mut data_out = Vec::with_capacity(layout.data_codewords());
    for (b, block) in blocks.iter_mut().enumerate() {
        let corrected = rs
            .decode(block)
            .map_err(|reason| QrError::UncorrectableBlock { block: b, reason })?;
        if corrected > 0 {
            trace!("block {b}: corrected {corrected} codewords");
        }
        data_out.extend_from_slice(&block[..layout.data_len(b)]);
    }

    Ok(data_out)
}

/// Pack bits into bytes, most significant bit first; a trailing partial byte is dropped
pub fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | bit as u8))
        .collect()
}

/// Codewords back to bits, most significant first
pub fn codewords_to_bits(codewords: &[u8]) -> Vec<bool> {
    codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 != 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::reed_solomon::tests::rs_encode;

    /// Build the interleaved codeword stream an encoder would place in the symbol.
    fn interleave(data: &[u8], layout: &BlockLayout) -> Vec<u8> {
        let mut blocks = Vec::new();
        let mut offset = 0;
        for b in 0..layout.block_count() {
            let len = layout.data_len(b);
            blocks.push(rs_encode(&data[offset..offset + len], layout.ec_per_block));
            offset += len;
        }
        let mut out = Vec::new();
        for i in 0..layout.short_data + 1 {
            for (b, block) in blocks.iter().enumerate() {
                if i < layout.data_len(b) {
                    out.push(block[i]);
                }
            }
        }
        for i in 0..layout.ec_per_block {
            for (b, block) in blocks.iter().enumerate() {
                out.push(block[layout.data_len(b) + i]);
            }
        }
        out
    }

    fn v(n: i64) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_mixed_block_sizes() {
        // 5-Q: two short blocks of 15, two long blocks of 16
        let layout = v(5).block_layout(ECLevel::Q);
        let data: Vec<u8> = (0..layout.data_codewords() as u32).map(|i| (i * 7) as u8).collect();
        let mut stream = interleave(&data, &layout);
        stream[3] ^= 0x40;
        stream[70] ^= 0x01;
        assert_eq!(deinterleave_and_correct(&stream, &layout).unwrap(), data);
    }

    #[test]
    fn test_full_symbol_bits() {
        let version = v(2);
        let layout = version.block_layout(ECLevel::H);
        let data: Vec<u8> = (0..layout.data_codewords() as u8).collect();
        let mut raw = codewords_to_bits(&interleave(&data, &layout));
        raw.extend(std::iter::repeat_n(false, version.remainder_bits()));
        assert_eq!(correct(&raw, version, ECLevel::H).unwrap(), codewords_to_bits(&data));
    }

    #[test]
    fn test_padding_must_be_zero() {
        let version = v(2);
        let layout = version.block_layout(ECLevel::L);
        let data = vec![0u8; layout.data_codewords()];
        let mut raw = codewords_to_bits(&interleave(&data, &layout));
        raw.extend([false, false, false, true, false, false, false]);
        assert!(matches!(
            correct(&raw, version, ECLevel::L),
            Err(QrError::NonZeroPadding { bits: 7 })
        ));
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(
            correct(&[false; 100], v(1), ECLevel::M),
            Err(QrError::DataLength {
                expected: 208,
                found: 100
            })
        ));
    }

    #[test]
    fn test_uncorrectable_block_is_named() {
        let layout = v(3).block_layout(ECLevel::Q);
        let data = vec![0x55u8; layout.data_codewords()];
        let mut stream = interleave(&data, &layout);
        // two blocks; odd positions belong to block 1, wreck it
        for i in (1..layout.total_codewords()).step_by(2) {
            stream[i] ^= 0xA5;
        }
        match deinterleave_and_correct(&stream, &layout) {
            Err(QrError::UncorrectableBlock { block, .. }) => assert_eq!(block, 1),
            other => panic!("expected block 1 to fail, got {other:?}"),
        }
    }

    #[test]
    fn test_bit_packing() {
        let bits = codewords_to_bits(&[0b1010_0001, 0xFF]);
        assert_eq!(bits.len(), 16);
        assert!(bits[0] && !bits[1] && bits[7]);
        assert_eq!(bits_to_codewords(&bits), vec![0b1010_0001, 0xFF]);
        assert_eq!(bits_to_codewords(&bits[..12]), vec![0b1010_0001]);
    }
}
