#[cfg(test)]
pub(crate) use test_utils::*;

// We keep this file's contents out of prod by putting them in a submodule guarded by cfg(test), but then "pub use" it to
// export its contents.
#[cfg(test)]
mod test_utils {

    /// Turn a pattern match into an `if let ... { else panic! }`.
    macro_rules! unwrap {
        ($enum_value:expr, $enum_variant:pat) => {
            let node = $enum_value;
            let node_debug = format!("{:?}", node);
            let $enum_variant = node else {
                panic!("Expected {} but saw {}", stringify!($enum_variant), node_debug);
            };
        };
    }
    pub(crate) use unwrap;
}
