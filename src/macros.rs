/// Compile a literal pattern once and hand out a `&'static Regex`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare a named vocabulary pattern as a function returning `&'static Regex`.
///
/// ```ignore
/// pattern! {
///     /// `DEV #12: Extra test`
///     deviation_header => r"^DEV\s+#(\d+):\s+(\S+)\s+(\S+)"
/// }
/// ```
#[macro_export]
macro_rules! pattern {
    ($( $(#[$meta:meta])* $name:ident => $pat:literal ),* $(,)?) => {
        $(
            $(#[$meta])*
            pub(crate) fn $name() -> &'static regex::Regex {
                $crate::regex!($pat)
            }
        )*
    };
}
