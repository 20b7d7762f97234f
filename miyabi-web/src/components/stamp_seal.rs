use crate::i18n;
use yew::prelude::*;

/// Characters of the checkpoint name carved into the seal.
const SEAL_CHARS: usize = 4;

#[must_use]
pub fn seal_text(name: &str) -> String {
    name.chars().take(SEAL_CHARS).collect()
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub name: AttrValue,
}

/// Red ink seal drawn over a collected checkpoint.
#[function_component(StampSeal)]
pub fn stamp_seal(props: &Props) -> Html {
    let ink = "filter: url(#ink-bleed)";
    html! {
        <div class="relative w-20 h-20 flex items-center justify-center rotate-[-12deg]" aria-hidden="true">
            <div class="absolute inset-0 rounded-full border-[3px] border-[#cf2e2e] opacity-90" style={ink}></div>
            <div class="absolute inset-[5px] rounded-full border border-[#cf2e2e] opacity-70" style={ink}></div>
            <div class="relative flex flex-col items-center text-[#cf2e2e]" style={ink}>
                <span class="text-[8px] font-bold tracking-widest">{ i18n::t("seal.celebrate") }</span>
                <span class="text-sm font-serif font-bold leading-tight">{ seal_text(&props.name) }</span>
                <div class="border-t border-[#cf2e2e] mt-0.5 pt-0.5">
                    <span class="text-[6px] font-bold tracking-wider">{ i18n::t("seal.brand") }</span>
                </div>
            </div>
            <div class="absolute -bottom-1 -right-1 w-6 h-6 rounded-full bg-[#cf2e2e] flex items-center justify-center">
                <span class="text-[10px] text-white font-bold">{ i18n::t("seal.done") }</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_keeps_first_four_characters() {
        assert_eq!(seal_text("富士山本宮浅間大社"), "富士山本");
        assert_eq!(seal_text("湖"), "湖");
    }
}
