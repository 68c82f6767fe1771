use log::info;

/// The platform's phone dialing facility.
pub trait Dialer {
    /// Ask the platform to dial `number`. Nothing is reported back.
    fn dial(&self, number: &str);
}

/// One-tap shortcut for calling emergency services
pub struct EmergencyDialer<D: Dialer> {
    dialer: D,
    number: String,
}

impl<D: Dialer> EmergencyDialer<D> {
    pub fn new(dialer: D, number: impl Into<String>) -> Self {
        Self {
            dialer,
            number: number.into(),
        }
    }

    pub fn call(&self) {
        info!("Dialing emergency number {}", self.number);
        self.dialer.dial(&self.number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::RecordingDialer;

    #[test]
    fn test_call_dials_fixed_number() {
        let dialer = EmergencyDialer::new(RecordingDialer::default(), "911");
        dialer.call();
        dialer.call();
        assert_eq!(dialer.dialer.dialed(), vec!["911", "911"]);
    }
}
