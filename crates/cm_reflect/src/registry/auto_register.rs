use crate::registry::TypeRegistry;

/// A function registering one or more types, collected by `inventory`.
///
/// Use the [`auto_register!`](crate::auto_register) macro rather than
/// submitting this directly.
pub struct AutoRegistration(pub fn(&mut TypeRegistry));

inventory::collect!(AutoRegistration);

/// Runs every submitted registration function, returns how many ran.
pub(super) fn register_all(registry: &mut TypeRegistry) -> usize {
    let mut count = 0;
    for registration in inventory::iter::<AutoRegistration> {
        (registration.0)(registry);
        count += 1;
    }
    count
}

/// Submits a registration function to [`TypeRegistry::auto_register`].
///
/// The argument must be a path to a `fn(&mut TypeRegistry)`.
///
/// # Examples
///
/// ```
/// use cm_reflect::info::ObjectInfo;
/// use cm_reflect::registry::TypeRegistry;
///
/// fn register_vec3(registry: &mut TypeRegistry) {
///     registry.register(
///         ObjectInfo::value_type("Vec3")
///             .with_field("X", "f32")
///             .with_field("Y", "f32")
///             .with_field("Z", "f32"),
///     );
/// }
///
/// cm_reflect::auto_register!(register_vec3);
///
/// let mut registry = TypeRegistry::new();
/// assert!(registry.auto_register());
/// assert!(registry.contains("Vec3"));
/// ```
#[macro_export]
macro_rules! auto_register {
    ($func:path) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::registry::AutoRegistration($func)
        }
    };
}

crate::auto_register!(TypeRegistry::register_builtins);
