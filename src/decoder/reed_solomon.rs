//! Reed-Solomon error correction for QR codeword blocks
//!
//! RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1.

const PRIMITIVE_POLY: u16 = 0x11d;

/// GF(256) field operations using log/exp tables
pub struct Gf256;

struct Tables {
    log: [u8; 256],
    exp: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut log = [0u8; 256];
    let mut exp = [0u8; 256];
    let mut value: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = value as u8;
        log[value as usize] = i as u8;
        value <<= 1;
        if value & 0x100 != 0 {
            value ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    exp[255] = exp[0];
    Tables { log, exp }
}

const TABLES: Tables = build_tables();
static LOG_TABLE: [u8; 256] = TABLES.log;
static EXP_TABLE: [u8; 256] = TABLES.exp;

impl Gf256 {
    /// Field product
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// `b` must be non-zero
    pub fn div(a: u8, b: u8) -> u8 {
        debug_assert!(b != 0, "division by zero in GF(256)");
        if a == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + 255 - log_b) % 255]
    }

    /// `a` raised to `n`
    pub fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }

    /// alpha^n
    fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    /// alpha^-n
    fn exp_inv(n: usize) -> u8 {
        EXP_TABLE[(255 - n % 255) % 255]
    }

    /// Evaluate a polynomial stored lowest degree first
    fn eval(poly: &[u8], x: u8) -> u8 {
        poly.iter()
            .rev()
            .fold(0u8, |acc, &coeff| Self::mul(acc, x) ^ coeff)
    }
}

/// Reed-Solomon decoder for one codeword block
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` EC codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` (data then EC codewords) in place.
    /// Returns the number of corrected codewords, or why the block is beyond repair.
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        if received.len() <= self.num_ecc_codewords || received.len() > 255 {
            return Err("block length out of range");
        }

        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = self.find_error_locator(&syndrome);
        let errors = sigma.len() - 1;
        if errors == 0 || 2 * errors > self.num_ecc_codewords {
            return Err("too many errors");
        }

        let error_positions = self.find_error_positions(&sigma, received.len())?;
        let error_values =
            self.find_error_values(&sigma, &syndrome, &error_positions, received.len())?;

        for (&pos, &value) in error_positions.iter().zip(&error_values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err("correction left a non-zero syndrome");
        }

        Ok(error_positions.len())
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        // Descending convention: received[0] is the coefficient of x^(n-1)
        (0..self.num_ecc_codewords)
            .map(|i| {
                received
                    .iter()
                    .fold(0u8, |acc, &c| Gf256::mul(acc, Gf256::exp(i)) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey; the result is trimmed so its degree is the error count
    fn find_error_locator(&self, syndrome: &[u8]) -> Vec<u8> {
        let mut sigma = vec![1u8];
        let mut b = vec![1u8];
        let mut delta_b: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l.min(sigma.len() - 1) {
                delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let previous = sigma.clone();
            let d = Gf256::div(delta, delta_b);
            if sigma.len() < b.len() + m {
                sigma.resize(b.len() + m, 0);
            }
            // sigma = sigma - d * x^m * b
            for (j, &coeff) in b.iter().enumerate() {
                sigma[j + m] ^= Gf256::mul(d, coeff);
            }

            if 2 * l <= i {
                b = previous;
                delta_b = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&0) {
            sigma.pop();
        }
        sigma
    }

    /// Chien search: position `pos` is in error when sigma(alpha^-(n-1-pos)) == 0
    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, &'static str> {
        let positions: Vec<usize> = (0..n)
            .filter(|&pos| Gf256::eval(sigma, Gf256::exp_inv(n - 1 - pos)) == 0)
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err("error locator roots fall outside the block");
        }
        Ok(positions)
    }

    /// Forney algorithm
    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        error_positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, &'static str> {
        // omega = syndrome * sigma mod x^(2t)
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for j in 0..=i.min(sigma.len() - 1) {
                *slot ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }
        }

        // formal derivative: only odd powers survive in characteristic 2
        let sigma_prime: Vec<u8> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &coeff)| if i % 2 == 1 { coeff } else { 0 })
            .collect();

        error_positions
            .iter()
            .map(|&pos| {
                let power = n - 1 - pos;
                let x_inv = Gf256::exp_inv(power);
                let denominator = Gf256::eval(&sigma_prime, x_inv);
                if denominator == 0 {
                    return Err("sigma derivative is zero");
                }
                let numerator = Gf256::eval(&omega, x_inv);
                Ok(Gf256::mul(Gf256::exp(power), Gf256::div(numerator, denominator)))
            })
            .collect()
    }
}
