#![allow(dead_code)]

//! Fixture genome shared by the integration tests.
//!
//! The fixture covers one coordinate per interesting agreement class:
//!
//! | start | eggNOG-mapper | Operon-mapper | CD-Search | kept |
//! |-------|---------------|---------------|-----------|------|
//! | 100   | COG0001       | COG0001       | COG0001   | eggNOG-mapper |
//! | 500   | COG0002       | COG0003       | COG0003   | Operon-mapper |
//! | 1000  | -             | -             | (none)    | Operon-mapper |
//! | 2000  | (none)        | -             | (none)    | Operon-mapper, reference pseudogene |
//! | 3000  | (none)        | (none)        | COG0005   | CD-Search |

use std::fs;
use std::path::Path;

pub const ORGANISM: &str = "ecoli";

pub const CDS: &str = ">lcl|NC_000913.3_cds_NP_1.1_1 [gene=a] [location=100..400] [gbkey=CDS]
ATGAAACGCATTAGCTAA
>lcl|NC_000913.3_cds_NP_2.1_2 [gene=b] [location=complement(500..800)] [gbkey=CDS]
ATGAATACTTTATGA
>lcl|NC_000913.3_cds_NP_3.1_3 [gene=c] [location=1000..1300] [gbkey=CDS]
ATGCCCTAA
";

pub const EGGNOG: &str = "##gff-version 3
## emapper decorated
lcl|NC_000913.3_cds_NP_1.1_1\teggNOG-mapper\tCDS\t1\t301\t50\t+\t0\tID=a_1;em_OGs=COG0001@1|root,COG0001@2|Bacteria;em_COG_cat=J;em_desc=alpha;em_Preferred_name=a
lcl|NC_000913.3_cds_NP_2.1_2\teggNOG-mapper\tCDS\t1\t301\t40\t+\t0\tID=b_1;em_OGs=COG0002@1|root;em_COG_cat=K;em_desc=beta
lcl|NC_000913.3_cds_NP_3.1_3\teggNOG-mapper\tCDS\t1\t301\t10\t+\t0\tID=c_1
";

pub const ORFS: &str = "NC_000913.3\tOperon-mapper\tCDS\t100\t400\t.\t+\t0\tID=ORF_1
NC_000913.3\tOperon-mapper\tCDS\t500\t800\t.\t-\t0\tID=ORF_2
NC_000913.3\tOperon-mapper\tCDS\t1000\t1300\t.\t+\t0\tID=ORF_3
NC_000913.3\tOperon-mapper\tCDS\t2000\t2300\t.\t+\t0\tID=ORF_4
";

pub const COGS: &str = "ORF_1\tCOG0001\t[J] Translation, ribosomal structure and biogenesis
ORF_2\tCOG0003\t[E] Amino acid transport and metabolism
";

pub const HITDATA: &str = "#Batch CD-search tool\tNIH/NLM/NCBI
#datatype\thitsConcise Results

Query\tHit type\tPSSM-ID\tFrom\tTo\tE-Value\tBitscore\tAccession\tShort name
Q#1 - >lcl|NC_000913.3_cds_NP_1.1_1 [gene=a] [location=100..400]\tspecific\t1\t1\t100\t1e-10\t50\tCOG0001\tA
Q#2 - >lcl|NC_000913.3_cds_NP_2.1_2 [gene=b] [location=complement(500..800)]\tspecific\t2\t1\t100\t1e-10\t50\tCOG0003\tB
Q#3 - >lcl|NC_000913.3_cds_NP_9.1_9 [gene=z] [location=3000..3300]\tspecific\t3\t1\t100\t1e-10\t50\tCOG0005\tZ
";

pub const GENOME: &str = ">NC_000913.3 Escherichia coli K-12\nACGTACGTACGTACGTACGT\nACGTACGTAC\n";

pub const REFERENCE: &str = "##gff-version 3
NC_000913.3\tRefSeq\tregion\t1\t4641652\t.\t+\t.\tID=NC_000913.3:1..4641652
NC_000913.3\tRefSeq\tpseudogene\t2000\t2300\t.\t+\t.\tID=gene-p1;pseudo=true
NC_000913.3\tRefSeq\tncRNA\t5000\t5100\t.\t+\t.\tID=rna-1;product=SokC
";

pub const EXPECTED_ROWS: [&str; 6] = [
    "NC_000913.3\teggNOG-mapper\tCDS\t100\t400\t50\t+\t0\tID=a_1;COG=COG0001;CAT=J;name=a;desc=alpha",
    "NC_000913.3\tOperon-mapper\tCDS\t500\t800\t.\t-\t0\tID=ORF_2;COG=COG0003;CAT=E;desc=Amino acid transport and metabolism",
    "NC_000913.3\tOperon-mapper\tCDS\t1000\t1300\t.\t+\t0\tID=ORF_3;COG=-;CAT=-",
    "NC_000913.3\tOperon-mapper\tpseudogene\t2000\t2300\t.\t+\t0\tID=ORF_4;COG=-;CAT=-",
    "NC_000913.3\tunknown\tCDS\t3000\t3300\t.\t+\t0\tCOG=COG0005",
    "NC_000913.3\tRefSeq\tncRNA\t5000\t5100\t.\t+\t.\tID=rna-1;product=SokC",
];

pub fn write_fixture(dir: &Path) {
    for (name, content) in [
        ("ecoli_cds.txt", CDS),
        ("ecoli_eggnog.gff", EGGNOG),
        ("ecoli_orf_operon.txt", ORFS),
        ("ecoli_cog_operon.txt", COGS),
        ("ecoli_batch.txt", HITDATA),
        ("ecoli.fasta", GENOME),
        ("ecoli.gff3", REFERENCE),
    ] {
        fs::write(dir.join(name), content).unwrap();
    }
}
