use yew::{html, Children, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct A4SheetProps {
    /// Inner margin in millimetres.
    #[prop_or(12)]
    pub padding_mm: u32,
    pub children: Children,
}

/// White A4 page the prescription is laid out on. Print CSS drops the
/// shadow and outer margin so the page maps 1:1 onto paper.
pub struct A4Sheet;

impl Component for A4Sheet {
    type Message = ();
    type Properties = A4SheetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        A4Sheet
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "width: 21cm;
             min-height: 29.7cm;
             box-sizing: border-box;
             margin: auto;
             padding: {}mm;
             background: white;
             box-shadow: 0 0 8px #ccc;",
            props.padding_mm
        );

        html! {
            <div class="prescription-sheet" style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
