const DNA_BASES: &[u8] = b"ACGTRYKMBVDHNSWacgtrykmbvdhnsw";
const DNA_COMPLEMENT: &[u8] = b"TGCAYRMKVBHDNSWtgcayrmkvbhdnsw";
const RNA_BASES: &[u8] = b"ACGURYKMBVDHNSWacgurykmbvdhnsw";
const RNA_COMPLEMENT: &[u8] = b"UGCAYRMKVBHDNSWugcayrmkvbhdnsw";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alphabet {
    #[default]
    Dna,
    Rna,
}

/// Byte substitution table. Bytes without a mapping pass through unchanged.
#[derive(Clone)]
pub struct Transcoder {
    table: [u8; 256],
}

impl Transcoder {
    pub fn new(src: &[u8], dst: &[u8]) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        for (&from, &to) in src.iter().zip(dst) {
            table[from as usize] = to;
        }
        Self { table }
    }

    /// IUPAC complement, case preserved.
    pub fn complement(alphabet: Alphabet) -> Self {
        match alphabet {
            Alphabet::Dna => Self::new(DNA_BASES, DNA_COMPLEMENT),
            Alphabet::Rna => Self::new(RNA_BASES, RNA_COMPLEMENT),
        }
    }

    pub fn transcode(&self, seq: &[u8]) -> Vec<u8> {
        seq.iter().map(|&b| self.table[b as usize]).collect()
    }

    fn transcode_char(&self, c: char) -> char {
        if c.is_ascii() {
            self.table[c as usize] as char
        } else {
            c
        }
    }
}

pub fn complement(seq: &str, alphabet: Alphabet) -> String {
    let transcoder = Transcoder::complement(alphabet);
    seq.chars().map(|c| transcoder.transcode_char(c)).collect()
}

pub fn reverse_complement(seq: &str, alphabet: Alphabet) -> String {
    let transcoder = Transcoder::complement(alphabet);
    seq.chars().rev().map(|c| transcoder.transcode_char(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: &str = "TTGATGGCTAAGAGTAAAATCTTAAAAAACACACTGGTTCTATATTTTCGTCAAGTTTTG";
    const REVERSE: &str = "CAAAACTTGACGAAAATATAGAACCAGTGTGTTTTTTAAGATTTTACTCTTAGCCATCAA";

    #[test]
    fn reverse_complements_dna() {
        assert_eq!(reverse_complement(FORWARD, Alphabet::Dna), REVERSE);
        assert_eq!(reverse_complement(REVERSE, Alphabet::Dna), FORWARD);
    }

    #[test]
    fn complement_tables_map_every_base() {
        for (alphabet, src, dst) in [
            (Alphabet::Dna, DNA_BASES, DNA_COMPLEMENT),
            (Alphabet::Rna, RNA_BASES, RNA_COMPLEMENT),
        ] {
            let transcoder = Transcoder::complement(alphabet);
            assert_eq!(transcoder.transcode(src), dst);
            assert_eq!(transcoder.transcode(dst), src);

            let src = std::str::from_utf8(src).unwrap();
            let mut reversed = dst.to_vec();
            reversed.reverse();
            assert_eq!(
                reverse_complement(src, alphabet).as_bytes(),
                reversed.as_slice()
            );
        }
    }

    #[test]
    fn rna_uses_uracil() {
        assert_eq!(complement("AUGc", Alphabet::Rna), "UACg");
        assert_eq!(reverse_complement("AUGc", Alphabet::Rna), "gCAU");
    }

    #[test]
    fn unknown_symbols_pass_through() {
        assert_eq!(complement("AC-GT*", Alphabet::Dna), "TG-CA*");
        assert_eq!(Transcoder::new(b"", b"").transcode(b"xyz"), b"xyz");
    }
}
