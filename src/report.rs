use serde::{Deserialize, Serialize};

use crate::engine::HuffmanCoder;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolStat {
    pub symbol: u8,
    pub count: u64,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    pub payload_bits: u64,
    pub distinct_symbols: usize,
    pub tree_depth: usize,
    pub average_code_length: f64,
    pub entropy_bits: f64,
    pub compression_ratio: f64,
    pub fingerprint: String,
    pub symbols: Vec<SymbolStat>,
}

impl CompressionReport {
    /// Summarise `coder` for an input of its own corpus and the size the
    /// compressed form ended up taking.
    pub fn analyze(coder: &HuffmanCoder, compressed_size: u64) -> Self {
        let freq = coder.frequencies();
        let codes = coder.codes();
        let original_size = freq.total();

        let mut symbols: Vec<SymbolStat> = freq
            .iter()
            .map(|(symbol, count)| SymbolStat {
                symbol,
                count,
                code: codes.get(symbol).map(ToString::to_string).unwrap_or_default(),
            })
            .collect();
        symbols.sort_by(|a, b| b.count.cmp(&a.count).then(a.symbol.cmp(&b.symbol)));

        let compression_ratio = if original_size > 0 {
            compressed_size as f64 / original_size as f64
        } else {
            0.0
        };

        Self {
            original_size,
            compressed_size,
            payload_bits: codes.encoded_bit_length(freq),
            distinct_symbols: freq.len(),
            tree_depth: coder.tree().depth(),
            average_code_length: codes.average_length(freq),
            entropy_bits: freq.entropy_bits(),
            compression_ratio,
            fingerprint: codes.fingerprint(),
            symbols,
        }
    }

    pub fn get_insights(&self) -> Vec<String> {
        let mut insights = Vec::new();

        if let Some(top) = self.symbols.first() {
            insights.push(format!(
                "Most frequent symbol {} appears {} times with a {}-bit code",
                display_symbol(top.symbol),
                top.count,
                top.code.len()
            ));
        }

        if self.average_code_length > 0.0 {
            let overhead = self.average_code_length - self.entropy_bits;
            insights.push(format!(
                "Codes average {:.3} bits/symbol, {:.3} above the entropy bound",
                self.average_code_length, overhead
            ));
        }

        if self.compression_ratio >= 1.0 {
            insights.push("Output is not smaller than the input".to_string());
        }

        insights
    }
}

/// Printable form of a byte for human output.
pub fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{symbol:02x}")
    }
}
