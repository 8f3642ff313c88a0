use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Starting,
    Running,
    Failed(String),
}

#[derive(Properties, PartialEq, Clone)]
pub struct StatusOverlayProps {
    pub status: Status,
}

#[function_component(StatusOverlay)]
pub fn status_overlay(props: &StatusOverlayProps) -> Html {
    let (title, body, border) = match &props.status {
        Status::Running => return html! {},
        Status::Starting => (
            "Starting camera",
            "Allow camera access. The hand model loads once the video is playing.".to_string(),
            "#30363d",
        ),
        Status::Failed(msg) => ("Could not start", msg.clone(), "#f85149"),
    };
    html! {
        <div style={format!("position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid {}; padding:24px 32px; border-radius:14px; max-width:480px; width:90%; font-size:14px; line-height:1.4; color:#e6edf3;", border)}>
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{ title }</h2>
            <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{ body }</p>
            <ul style="margin:0 0 0 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"Pinch thumb and index finger over a square to grab it."}</li>
                <li>{"Or drag squares with the left mouse button."}</li>
                <li>{"Drop a square on the right half to score 25, once per square."}</li>
            </ul>
        </div>
    }
}
