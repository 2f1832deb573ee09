/// Signs an encoded query string.
///
/// DJB2 variant: seed 5381, then `n = 33 * n ^ byte` for every byte, with
/// wrapping `u32` arithmetic. The digest is the decimal accumulator.
pub fn sign(encoded_query: &str) -> String {
    encoded_query
        .bytes()
        .fold(5381u32, |n, b| n.wrapping_mul(33) ^ u32::from(b))
        .to_string()
}
