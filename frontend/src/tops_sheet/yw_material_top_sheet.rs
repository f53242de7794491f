use uuid::Uuid;
use yew::{html, Callback, Component, Context, Html, Properties};

/// Sheet sliding in from the top of the page, used for every add/edit
/// dialog. Visibility is driven by the `open` prop.
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    pub title: String,
    #[prop_or_default]
    pub children: Html,
    pub on_close: Callback<()>,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let class = if props.open { "top-sheet show" } else { "top-sheet" };
        let title_id = format!("{}-title", self.id);
        let on_close = props.on_close.clone();

        html! {
            <div class={class} id={self.id.clone()} role="dialog" aria-labelledby={title_id.clone()}>
                <div class="top-sheet-header">
                    <h2 id={title_id}>{ props.title.clone() }</h2>
                    <button class="icon-btn" onclick={move |_| on_close.emit(())}>
                        <i class="material-icons">{"close"}</i>
                    </button>
                </div>
                if props.open {
                    <div class="top-sheet-body">{ props.children.clone() }</div>
                }
            </div>
        }
    }
}
