//! Test data fixtures for consistent testing

/// Two rows, five minutes apart
pub fn two_rows_tsv() -> &'static str {
    "2023\t01\t01\t00\t00\t5.0\t-\t410.0\n\
     2023\t01\t01\t00\t05\t5.2\t-\t411.0\n"
}

/// Unsorted rows over three days, with a duplicated timestamp and extra columns
pub fn unsorted_tsv() -> &'static str {
    "2023\t03\t02\t10\t00\t1.95\t0\t421.3\t99\n\
     2023\t03\t01\t08\t30\t1.90\t0\t419.8\t99\n\
     2023\t03\t03\t23\t45\t2.05\t0\t425.1\t99\n\
     2023\t03\t02\t10\t00\t1.97\t0\t421.9\t99\n\
     2023\t03\t01\t12\t15\t1.93\t0\t420.2\t99\n"
}

/// A row missing most of its columns
pub fn malformed_tsv() -> &'static str {
    "2023\t03\t01\t08\t30\t1.90\t0\t419.8\n\
     2023\t03\t01\n"
}
