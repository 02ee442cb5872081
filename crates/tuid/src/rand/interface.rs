/// A trait for random sources that return random values.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests.
///
/// # Example
/// ```
/// use tuid::RandSource;
///
/// struct FixedRand;
/// impl RandSource<i32> for FixedRand {
///     fn rand(&self) -> i32 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random value.
    fn rand(&self) -> T;
}

impl<T, R: RandSource<T> + ?Sized> RandSource<T> for &R {
    fn rand(&self) -> T {
        (**self).rand()
    }
}
