const BASE_ORDER: &[u8; 4] = b"TCAG";

/// NCBI translation table 1, codons ordered by [`BASE_ORDER`] per position.
const STANDARD_AMINO_ACIDS: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

pub const STOP: char = '*';
pub const UNKNOWN: char = 'X';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodonTable {
    amino_acids: [u8; 64],
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl CodonTable {
    pub fn standard() -> Self {
        Self {
            amino_acids: *STANDARD_AMINO_ACIDS,
        }
    }

    /// Amino acid for one codon; [`UNKNOWN`] when a base is not A/C/G/T/U.
    pub fn amino_acid(&self, codon: [u8; 3]) -> char {
        let mut index = 0;
        for base in codon {
            let Some(rank) = base_rank(base) else {
                return UNKNOWN;
            };
            index = index * 4 + rank;
        }
        self.amino_acids[index] as char
    }

    /// Translates `seq` codon by codon from its first base. Stop codons come
    /// out as [`STOP`] and a trailing partial codon is dropped.
    pub fn translate(&self, seq: &str) -> String {
        seq.as_bytes()
            .chunks_exact(3)
            .map(|codon| self.amino_acid([codon[0], codon[1], codon[2]]))
            .collect()
    }
}

fn base_rank(base: u8) -> Option<usize> {
    let base = match base.to_ascii_uppercase() {
        b'U' => b'T',
        other => other,
    };
    BASE_ORDER.iter().position(|&b| b == base)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENE: &str = concat!(
        "TTGATGGCTAAGAGTAAAATCTTAAAAAACACACTGGTTCTATATTTTCGTCAAGTTTTG",
        "ATTGTATTAATTACTCTCTATTCAATGAGAGTTGTATTAAATGAATTAGGTGTGGATGAT",
        "TTTGGTATTTATAGCGTTGTGGCTGGTTTTGTAACTTTACTTGCATTTTTACCCGGAAGC",
        "ATGGCGAGTGCAACGCAGCGGTTTTTCTCTTTTGCGATGGGGAAATCGGATATAGTAAAA",
        "TTAAAGCAAACCTTCAGTGTTAATTTAGTTATGTATACTGGCATAGCCTTGTTAGCATAT",
        "ATAACATTTCAAACTATCGGATTTTGGTATGTTGATGAATATCTAAAAATACCTCATAAC",
        "CGCTTTCATGCAGCCTTGGAATTATATCACTATGTGTCTTTATCATTTATTTTTTCAATT",
        "TTTTCTGCGCCTTTTATCGCGATTTTAATTGCGCACGAAGATATGCACATTTATGCGATC",
        "TTCTCGGTTTTTGATGCATTTTTAAAACTAGTAGCCGCAATTTCTTTAGACTATGTGAAC",
        "TATGATTTGTTAGCTTATTATGGAGTGGCTCTTTTGATTGTATCTGGATTGCTTGCTTTC",
        "GCGTATATTTTTATATGTATAAAGAAATATCCAGAGTGTCAAATGAAAAAGCTTTATTGG",
        "AGTTCGAGTATACTGAAAGAAATTATTGGTTTCACGATATGGACTTTGCTAGGTCAATTG",
        "AGCACTGTTTTTAGAAATCAGGCAGTAACTGTTCTTGTAAACCAAATGTTTAATCCTTCA",
        "ATTGTGGCAGCTCGTGCAATTGCCTTGAATGTGGCTAGTCAAGTTGGAATTTTTTCGAAT",
        "AATTTAAATACAGGGTTATATCCACCAATTATAAAAGCTTACGCAGCAAATCAAAAAGAG",
        "GAAATGCTGAGTTTAGTTTTTAATGGTTCTAAACTGACTTTCTTCTTGATGTGGGTATGT",
        "GCATTACCCATGTTGCTTGAAATGGAAACGATATTAACACTTTGGCTAAAAACACCACCA",
        "TCAGAAGCGATATTATTTACTCAGTTAGCGATTGTTGAATCCTTGATACTGGCTATAAGC",
        "ATGCCTTTAACTACTGCGGCAAGAGCACCAGGGAAAATGGCGTTGTATGAAATAATTCTA",
        "GGCGCCATTCAAATAGCAATATTTTTTGTTTCATGGTGGTTTCTGAAATTTGGTTATTCT",
        "GCTGAATGGGTTTTCTACATAGCAATAGCGGCTAATATTATTATGTTTAAAGTTCGCTTG",
        "TTATTAGTAAGCTATTTAACTGATCTTCCTGTAATGGCTTATTATCAAAGAGTTGTAGTT",
        "CCGGTTTTATCTGTTCTGGTTATTTCATCATTATCTAGTATCTTGCTATTGAACAACTTA",
        "CCAAGAAATTTAGGTGCATCTTTATTGGTGATTATTTTTTCTATCGGTGTTTCGATATTG",
        "ACAATGTACTTCTTAGGCTTAGATAAGTACTGGCGTGAAAAAGTGGTCGGTGTGCTAACC",
        "AGTAAATTTTTAAAATCTAGAGAGGTGCGATGA",
    );
    const PRODUCT: &str = concat!(
        "LMAKSKILKNTLVLYFRQVLIVLITLYSMRVVLNELGVDDFGIYSVVAGFVTLLAFLPGSMASATQRFFS",
        "FAMGKSDIVKLKQTFSVNLVMYTGIALLAYITFQTIGFWYVDEYLKIPHNRFHAALELYHYVSLSFIFSI",
        "FSAPFIAILIAHEDMHIYAIFSVFDAFLKLVAAISLDYVNYDLLAYYGVALLIVSGLLAFAYIFICIKKY",
        "PECQMKKLYWSSSILKEIIGFTIWTLLGQLSTVFRNQAVTVLVNQMFNPSIVAARAIALNVASQVGIFSN",
        "NLNTGLYPPIIKAYAANQKEEMLSLVFNGSKLTFFLMWVCALPMLLEMETILTLWLKTPPSEAILFTQLA",
        "IVESLILAISMPLTTAARAPGKMALYEIILGAIQIAIFFVSWWFLKFGYSAEWVFYIAIAANIIMFKVRL",
        "LLVSYLTDLPVMAYYQRVVVPVLSVLVISSLSSILLLNNLPRNLGASLLVIIFSIGVSILTMYFLGLDKY",
        "WREKVVGVLTSKFLKSREVR",
    );

    #[test]
    fn translates_gene_up_to_stop() {
        assert_eq!(GENE.len() % 3, 0);
        let protein = CodonTable::standard().translate(GENE);
        assert_eq!(&protein[..protein.len() - 1], PRODUCT);
        assert!(protein.ends_with(STOP));
    }

    #[test]
    fn codon_lookup() {
        let table = CodonTable::default();
        assert_eq!(table.amino_acid(*b"ATG"), 'M');
        assert_eq!(table.amino_acid(*b"ttg"), 'L');
        assert_eq!(table.amino_acid(*b"UGG"), 'W');
        assert_eq!(table.amino_acid(*b"TAA"), STOP);
        assert_eq!(table.amino_acid(*b"ANG"), UNKNOWN);
    }

    #[test]
    fn partial_codon_is_dropped() {
        assert_eq!(CodonTable::standard().translate("ATGGC"), "M");
        assert_eq!(CodonTable::standard().translate(""), "");
    }
}
