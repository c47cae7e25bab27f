/// Repeat an [item](https://doc.rust-lang.org/nightly/reference/items.html) `$imp` once per type
/// `$Ty`, making each available within `$imp` under the alias `$Alias`.
///
/// Please use traits instead of this, where reasonable.
#[macro_export]
macro_rules! item_with {
    {$Alias:ident: $($Ty:ty),+ => $imp:item} => {
        $(
            const _: () = { // anonymous module
                type $Alias = $Ty;
                $imp
            };
        )+
    };
}
