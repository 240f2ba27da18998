use std::io;
use twenty48::session::Session;
use twenty48::ui::TerminalGuard;

fn main() -> io::Result<()> {
    let _guard = TerminalGuard::init("2048 Game. Keys - Up, Down, Right, Left.")?;
    let mut session = Session::new();
    session.run()?;
    Ok(())
}
