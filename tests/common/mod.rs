//! Shared fixtures for the integration tests.

#![allow(dead_code)]

/// 211 body heights in centimetres, range 143..=186.
pub const HEIGHTS: [f64; 211] = [
    174.0, 166.0, 157.0, 161.0, 165.0, 162.0, 161.0, 164.0, 172.0, 158.0, 161.0, 163.0,
    160.0, 154.0, 171.0, 160.0, 168.0, 171.0, 161.0, 162.0, 168.0, 164.0, 166.0, 159.0,
    172.0, 154.0, 154.0, 153.0, 159.0, 160.0, 173.0, 150.0, 166.0, 157.0, 177.0, 165.0,
    168.0, 152.0, 168.0, 164.0, 158.0, 153.0, 164.0, 174.0, 179.0, 159.0, 165.0, 167.0,
    169.0, 164.0, 168.0, 151.0, 174.0, 166.0, 169.0, 170.0, 159.0, 162.0, 153.0, 175.0,
    178.0, 157.0, 170.0, 174.0, 169.0, 159.0, 154.0, 165.0, 167.0, 161.0, 168.0, 157.0,
    182.0, 175.0, 170.0, 155.0, 164.0, 174.0, 167.0, 160.0, 159.0, 160.0, 153.0, 151.0,
    169.0, 155.0, 143.0, 163.0, 155.0, 173.0, 166.0, 164.0, 186.0, 161.0, 158.0, 150.0,
    159.0, 167.0, 163.0, 166.0, 155.0, 149.0, 157.0, 164.0, 166.0, 171.0, 172.0, 154.0,
    161.0, 169.0, 164.0, 173.0, 154.0, 162.0, 171.0, 156.0, 155.0, 160.0, 156.0, 165.0,
    149.0, 175.0, 150.0, 162.0, 179.0, 154.0, 167.0, 158.0, 155.0, 147.0, 161.0, 161.0,
    173.0, 166.0, 156.0, 171.0, 158.0, 164.0, 168.0, 173.0, 166.0, 148.0, 174.0, 179.0,
    173.0, 167.0, 162.0, 166.0, 167.0, 164.0, 158.0, 160.0, 163.0, 161.0, 154.0, 151.0,
    156.0, 150.0, 157.0, 163.0, 168.0, 170.0, 165.0, 174.0, 149.0, 161.0, 162.0, 155.0,
    164.0, 156.0, 157.0, 170.0, 173.0, 165.0, 160.0, 166.0, 166.0, 160.0, 165.0, 159.0,
    157.0, 162.0, 173.0, 173.0, 151.0, 151.0, 169.0, 167.0, 145.0, 166.0, 169.0, 161.0,
    169.0, 170.0, 172.0, 159.0, 161.0, 162.0, 151.0, 165.0, 161.0, 151.0, 156.0, 167.0,
    148.0, 167.0, 170.0, 149.0, 162.0, 169.0, 157.0,
];

/// 64 event counts per interval, values 0..=4.
pub const COUNTS: [f64; 64] = [
    2.0, 0.0, 1.0, 2.0, 0.0, 0.0, 2.0, 2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0,
    0.0, 4.0, 0.0, 0.0, 1.0, 0.0, 4.0, 1.0, 1.0, 0.0, 2.0, 1.0, 0.0, 0.0, 2.0, 1.0,
    1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 3.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 2.0,
    3.0, 0.0, 2.0, 4.0, 0.0, 0.0, 0.0, 3.0, 0.0, 2.0, 0.0, 2.0, 2.0, 2.0, 1.0, 1.0,
];
