
pub use hash::{hash_function_1, hash_function_2};
pub use prime::{is_prime, next_prime};


pub mod prime {

    /// Trial division by odd factors up to the square root.
    pub fn is_prime(n: usize) -> bool {
        if n == 2 || n == 3 {
            return true;
        }
        if n == 1 || n % 2 == 0 {
            return false;
        }

        let mut factor = 3;
        while factor * factor <= n {
            if n % factor == 0 {
                return false;
            }
            factor += 2;
        }
        true
    }

    /// Smallest odd prime reachable from `n`. An even `n` is bumped to the
    /// next odd number before the search, so `next_prime(2) == 3`.
    pub fn next_prime(n: usize) -> usize {
        let mut candidate = if n % 2 == 0 { n + 1 } else { n };
        while !is_prime(candidate) {
            candidate += 2;
        }
        candidate
    }


    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..30).filter(|n| is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn next_prime_rounds_up() {
        assert_eq!(next_prime(4), 5);
        assert_eq!(next_prime(10), 11);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(22), 23);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(106), 107);
    }

    #[test]
    fn next_prime_skips_even_inputs() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
    }

    #[test]
    fn squares_of_primes_are_rejected() {
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(10_201));
        assert!(is_prime(10_007));
    }
}


pub mod hash {

    /// Sum of the key's code points.
    pub fn hash_function_1(key: &str) -> usize {
        key.chars()
            .fold(0usize, |acc, c| acc.wrapping_add(c as usize))
    }

    /// Sum of the key's code points, each weighted by its 1-based position.
    pub fn hash_function_2(key: &str) -> usize {
        key.chars()
            .enumerate()
            .fold(0usize, |acc, (i, c)| acc.wrapping_add((i + 1).wrapping_mul(c as usize)))
    }


    #[test]
    fn anagrams_collide_only_under_the_first() {
        assert_eq!(hash_function_1("abc"), hash_function_1("cba"));
        assert_ne!(hash_function_2("abc"), hash_function_2("cba"));
    }

    #[test]
    fn known_values() {
        assert_eq!(hash_function_1(""), 0);
        assert_eq!(hash_function_1("ab"), 97 + 98);
        assert_eq!(hash_function_2("ab"), 97 + 2 * 98);
    }
}
