//! The input module capability.
//!
//! Every sensor module implements [`InputModule`]. The external poller calls
//! [`read`](InputModule::read) to obtain a fixed-width reading; later the
//! same module type turns the bytes back into labeled values with
//! [`decode`](InputModule::decode).
//!
//! # Lifecycle
//!
//! 1. Construction - settings resolved from the module's `ConfigDefinition`
//!    parametrize the driver collaborator
//! 2. `self_test()` - optional, exercises one read
//! 3. `read()` - called by the poller for every measurement
//!
//! # Contracts
//!
//! | Operation | Touches driver | Mutates module |
//! |-----------|----------------|----------------|
//! | `read()` | yes | driver state only |
//! | `decode()` | no | no |
//! | `config_schema()` | no | no |

use crate::module::codec::Reading;
use crate::module::descriptor::{DecodedReading, ModuleDescriptor, ModuleId};
use crate::module::error::ModuleError;
use crate::module::schema::ConfigDefinition;

/// Capability every sensor module implements.
pub trait InputModule: Send {
    /// Static metadata of this module type.
    fn descriptor(&self) -> &'static ModuleDescriptor;

    /// Stable unique identifier.
    fn id(&self) -> ModuleId {
        self.descriptor().id
    }

    /// Take one measurement and pack it.
    ///
    /// The returned reading is exactly `descriptor().width()` bytes long.
    ///
    /// # Errors
    /// Driver failures surface as `ModuleError::Driver`; values that do not
    /// fit their field surface as `ModuleError::Encode` or
    /// `ModuleError::OutOfRange`. Nothing is retried.
    fn read(&mut self) -> Result<Reading, ModuleError>;

    /// Turn a reading produced by this module type back into labeled values.
    ///
    /// Pure function of `bytes`. The buffer length is checked against the
    /// declared width before any field is extracted.
    ///
    /// The caller must only pass buffers produced by a module with the same
    /// `id()`.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedReading, ModuleError> {
        self.descriptor().decode(bytes)
    }

    /// Exercise `read` once.
    fn self_test(&mut self) -> Result<(), ModuleError> {
        self.read().map(|_| ())
    }

    /// Configuration schema, independent of instance state.
    fn config_schema(&self) -> &'static ConfigDefinition {
        &self.descriptor().config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::codec::{FieldSpec, FieldValue, ReadingLayout};
    use crate::module::error::DriverError;

    static COUNTER: ModuleDescriptor = ModuleDescriptor::new(
        ModuleId(9),
        "Counter",
        ReadingLayout::new(1, &[FieldSpec::unsigned("count", 0, 1)]),
        ConfigDefinition::new("input_counter", "Counts reads.", &[]),
    );

    struct CounterModule {
        count: u64,
        broken: bool,
    }

    impl InputModule for CounterModule {
        fn descriptor(&self) -> &'static ModuleDescriptor {
            &COUNTER
        }

        fn read(&mut self) -> Result<Reading, ModuleError> {
            if self.broken {
                return Err(ModuleError::Driver {
                    module: COUNTER.name,
                    source: DriverError::NotReady("unplugged".into()),
                });
            }
            self.count += 1;
            COUNTER.encode(&[FieldValue::Unsigned(self.count)])
        }
    }

    #[test]
    fn test_default_methods_follow_descriptor() {
        let module = CounterModule {
            count: 0,
            broken: false,
        };
        assert_eq!(module.id(), ModuleId(9));
        assert_eq!(module.config_schema().section, "input_counter");
    }

    #[test]
    fn test_self_test_exercises_read() {
        let mut module = CounterModule {
            count: 0,
            broken: false,
        };
        module.self_test().unwrap();
        assert_eq!(module.count, 1);

        let mut broken = CounterModule {
            count: 0,
            broken: true,
        };
        assert!(matches!(broken.self_test(), Err(ModuleError::Driver { .. })));
    }

    #[test]
    fn test_encode_overflow_surfaces() {
        let mut module = CounterModule {
            count: 255,
            broken: false,
        };
        assert!(matches!(module.read(), Err(ModuleError::Encode { .. })));
    }

    #[test]
    fn test_decode_does_not_mutate() {
        let mut module = CounterModule {
            count: 0,
            broken: false,
        };
        let reading = module.read().unwrap();
        let decoded = module.decode(&reading).unwrap();
        let again = module.decode(&reading).unwrap();
        assert_eq!(decoded, again);
        assert_eq!(module.count, 1);
    }
}
