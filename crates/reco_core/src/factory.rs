//! Object factories: build a domain object from a parameter descriptor.
//!
//! A factory is the capability "can build object kind `K` from parameter kind
//! `P`". It is implemented once per (K, P) pair and chosen statically by the
//! call site. Construction is fallible: a caller receives either a complete
//! object it owns outright or a [`StatusCode`], never a half-built value.

use std::fmt;
use std::marker::PhantomData;

use tracing::warn;

use crate::status::{StatusCode, StatusResult};

/// Source side of the structured persistence collaborator.
pub trait FileReader {
    /// Fill `buffer` completely or fail.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> StatusResult<()>;
}

/// Sink side of the structured persistence collaborator.
pub trait FileWriter {
    fn write_bytes(&mut self, bytes: &[u8]) -> StatusResult<()>;
}

impl FileReader for &[u8] {
    fn read_bytes(&mut self, buffer: &mut [u8]) -> StatusResult<()> {
        if self.len() < buffer.len() {
            return Err(StatusCode::Failure);
        }
        let (head, tail) = self.split_at(buffer.len());
        buffer.copy_from_slice(head);
        *self = tail;
        Ok(())
    }
}

impl FileWriter for Vec<u8> {
    fn write_bytes(&mut self, bytes: &[u8]) -> StatusResult<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Trait for factories that turn parameters of kind `P` into objects.
///
/// # Examples
///
/// ```rust,no_run
/// use reco_core::calo_hit::CaloHitFactory;
/// use reco_core::factory::ObjectFactory;
///
/// let factory = CaloHitFactory::new();
/// let parameters = factory.new_parameters();
/// // Unpopulated descriptors are rejected.
/// assert!(factory.create(&parameters).is_err());
/// ```
pub trait ObjectFactory<P> {
    type Object;

    /// A fresh, default-initialized descriptor owned by the caller.
    fn new_parameters(&self) -> P;

    /// Build an object from `parameters`.
    ///
    /// On failure nothing escapes: any partially built state is dropped here and
    /// the failure kind is returned unchanged.
    fn create(&self, parameters: &P) -> StatusResult<Self::Object>;

    /// Populate `parameters` from a persistence source. No-op by default.
    fn read(&self, _parameters: &mut P, _reader: &mut dyn FileReader) -> StatusResult<()> {
        Ok(())
    }

    /// Persist `object`. No-op by default.
    fn write(&self, _object: &Self::Object, _writer: &mut dyn FileWriter) -> StatusResult<()> {
        Ok(())
    }
}

/// Fallible construction of `Self` from a parameter descriptor.
pub trait FromParameters<P>: Sized {
    fn from_parameters(parameters: &P) -> StatusResult<Self>;
}

/// Factory for any object kind that knows how to build itself from `P`.
pub struct DefaultObjectFactory<P, O> {
    _marker: PhantomData<fn(&P) -> O>,
}

impl<P, O> DefaultObjectFactory<P, O> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P, O> Default for DefaultObjectFactory<P, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, O> Clone for DefaultObjectFactory<P, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, O> Copy for DefaultObjectFactory<P, O> {}

impl<P, O> fmt::Debug for DefaultObjectFactory<P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultObjectFactory")
            .field("object", &std::any::type_name::<O>())
            .finish()
    }
}

impl<P, O> ObjectFactory<P> for DefaultObjectFactory<P, O>
where
    P: Default,
    O: FromParameters<P>,
{
    type Object = O;

    fn new_parameters(&self) -> P {
        P::default()
    }

    fn create(&self, parameters: &P) -> StatusResult<O> {
        O::from_parameters(parameters).map_err(|status| {
            warn!(
                %status,
                object = std::any::type_name::<O>(),
                "failed to construct object from parameters"
            );
            status
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InputValue;

    #[derive(Debug, Default)]
    struct WidgetParameters {
        size: InputValue<u32>,
    }

    #[derive(Debug, PartialEq)]
    struct Widget {
        size: u32,
    }

    impl FromParameters<WidgetParameters> for Widget {
        fn from_parameters(parameters: &WidgetParameters) -> StatusResult<Self> {
            let size = parameters.size.get()?;
            if size == 0 {
                return Err(StatusCode::InvalidParameter);
            }
            Ok(Self { size })
        }
    }

    /// Factory that persists the widget size as little-endian bytes.
    struct PersistentWidgetFactory;

    impl ObjectFactory<WidgetParameters> for PersistentWidgetFactory {
        type Object = Widget;

        fn new_parameters(&self) -> WidgetParameters {
            WidgetParameters::default()
        }

        fn create(&self, parameters: &WidgetParameters) -> StatusResult<Widget> {
            Widget::from_parameters(parameters)
        }

        fn read(
            &self,
            parameters: &mut WidgetParameters,
            reader: &mut dyn FileReader,
        ) -> StatusResult<()> {
            let mut bytes = [0u8; 4];
            reader.read_bytes(&mut bytes)?;
            parameters.size.set(u32::from_le_bytes(bytes));
            Ok(())
        }

        fn write(&self, object: &Widget, writer: &mut dyn FileWriter) -> StatusResult<()> {
            writer.write_bytes(&object.size.to_le_bytes())
        }
    }

    #[test]
    fn new_parameters_are_unpopulated() {
        let factory = DefaultObjectFactory::<WidgetParameters, Widget>::new();
        let parameters = factory.new_parameters();
        assert!(!parameters.size.is_initialized());
        assert_eq!(factory.create(&parameters), Err(StatusCode::NotInitialized));
    }

    #[test]
    fn create_propagates_construction_failure_unchanged() {
        let factory = DefaultObjectFactory::<WidgetParameters, Widget>::new();
        let mut parameters = factory.new_parameters();
        parameters.size.set(0);
        assert_eq!(factory.create(&parameters), Err(StatusCode::InvalidParameter));

        parameters.size.set(3);
        assert_eq!(factory.create(&parameters), Ok(Widget { size: 3 }));
    }

    #[test]
    fn default_persistence_hooks_succeed_without_touching_io() {
        let factory = DefaultObjectFactory::<WidgetParameters, Widget>::new();
        let mut parameters = factory.new_parameters();
        let mut source: &[u8] = &[];
        assert_eq!(factory.read(&mut parameters, &mut source), Ok(()));

        let mut sink = Vec::new();
        assert_eq!(factory.write(&Widget { size: 1 }, &mut sink), Ok(()));
        assert!(sink.is_empty());
    }

    #[test]
    fn specialised_hooks_round_trip_through_collaborators() {
        let factory = PersistentWidgetFactory;
        let mut sink = Vec::new();
        factory
            .write(&Widget { size: 42 }, &mut sink)
            .expect("write widget");

        let mut source: &[u8] = &sink;
        let mut parameters = factory.new_parameters();
        factory.read(&mut parameters, &mut source).expect("read widget");
        assert_eq!(factory.create(&parameters), Ok(Widget { size: 42 }));
    }

    #[test]
    fn short_source_fails_read() {
        let mut source: &[u8] = &[1, 2];
        let mut buffer = [0u8; 4];
        assert_eq!(source.read_bytes(&mut buffer), Err(StatusCode::Failure));
    }
}
