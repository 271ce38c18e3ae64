/// Implements `FnExt` for functions of every arity up to the given list of type params.
macro_rules! tuple_impls {
    () => {
        tuple_impls!(@impl);
    };
    ($Head:ident $( $Tail:ident )*) => {
        tuple_impls!($( $Tail )*);
        tuple_impls!(@impl $Head $( $Tail )*);
    };
    (@impl $( $Arg:ident )*) => {
        #[async_trait]
        impl<$($Arg,)* Fun, Fut, Out> FnExt<($($Arg,)*)> for Fun
        where
            $($Arg: FromRequest + Send + 'static,)*
            $($Arg::Error: IntoResponse + Send,)*
            Fun: Fn($($Arg,)*) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Result<Out>> + Send + 'static,
            Out: 'static,
        {
            type Output = Result<Out>;

            #[allow(unused, unused_mut)]
            async fn call(&self, mut req: Request) -> Self::Output {
                (self)($(extract::<$Arg>(&mut req).await?,)*).await
            }
        }
    };
}

/// Gives an extractor newtype `new`, `into_inner` and transparent access to its value.
macro_rules! wrapper {
    ($($name:ident),* $(,)?) => {
        $(
            impl<T> $name<T> {
                #[doc = concat!("Wraps a value in [`", stringify!($name), "`].")]
                #[inline]
                pub const fn new(value: T) -> Self {
                    Self(value)
                }

                /// Unwraps the value.
                #[inline]
                pub fn into_inner(self) -> T {
                    self.0
                }
            }

            impl<T> std::ops::Deref for $name<T> {
                type Target = T;

                fn deref(&self) -> &T {
                    &self.0
                }
            }

            impl<T> std::ops::DerefMut for $name<T> {
                fn deref_mut(&mut self) -> &mut T {
                    &mut self.0
                }
            }
        )*
    };
}
