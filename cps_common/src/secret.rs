use std::fmt;

/// Wrapper for credential material (gateway keys, the JWT secret). The wrapped value never appears in `Debug`
/// or `Display` output; call [`Secret::expose`] only at the point where the credential actually leaves the
/// process, and keep the borrow short-lived.
#[derive(Clone)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Grants access to the wrapped credential. Never log the result.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Default> Default for Secret<T> {
    fn default() -> Self {
        Self(T::default())
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod test {
    use super::Secret;

    #[test]
    fn formatting_never_leaks_the_value() {
        let secret = Secret::new("hunter2".to_string());
        assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
        assert_eq!(secret.to_string(), "<redacted>");
        assert_eq!(format!("config = {secret}, debug = {secret:?}"), "config = <redacted>, debug = Secret(<redacted>)");
        assert_eq!(secret.expose().as_str(), "hunter2");
        assert_eq!(secret.into_inner(), "hunter2");
    }
}
