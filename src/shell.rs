use quarkos::input::{self, line_str};
use quarkos::vga_buffer::{self, ColorCode};
use quarkos::{colored_print, power, print, println};
use crate::art;

const INPUT_LEN: usize = 50;
const HOST_NAME: &str = "quark";

const ROOT_USER: &str = "root";
const ROOT_PASSWORD: &str = "root";

const ERROR_COLOR: ColorCode = ColorCode::from_raw(0x04);
const MENU_COLOR: ColorCode = ColorCode::from_raw(0x0F);

/// Command function type
type CommandFn = fn(&Session);

/// Command registry entry
struct Command {
    name: &'static str,
    help: &'static str,
    func: CommandFn,
}

/// Command dispatch table - add new commands here
const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        help: "Show this menu",
        func: cmd_help,
    },
    Command {
        name: "clear",
        help: "Clear screen",
        func: cmd_clear,
    },
    Command {
        name: "cow",
        help: "Show ASCII art cow",
        func: cmd_cow,
    },
    Command {
        name: "rimo",
        help: "Rick and Morty art",
        func: cmd_rimo,
    },
    Command {
        name: "whoami",
        help: "Print the logged-in user",
        func: cmd_whoami,
    },
    Command {
        name: "q",
        help: "Shutdown system",
        func: cmd_quit,
    },
];

/// The logged-in user.
struct Session {
    user: [u8; INPUT_LEN],
}

impl Session {
    fn user(&self) -> &str {
        line_str(&self.user)
    }
}

fn find_command(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Log in, then read and dispatch commands until shutdown.
pub fn run() -> ! {
    let session = login();

    loop {
        print!("{}@{}:~$ ", session.user(), HOST_NAME);

        let mut line = [0u8; INPUT_LEN];
        input::read_line(&mut line);
        let name = line_str(&line);

        match find_command(name) {
            Some(cmd) => (cmd.func)(&session),
            None if name.is_empty() => {}
            None => log::debug!("unknown command {:?}", name),
        }
    }
}

fn login() -> Session {
    loop {
        let mut user = [0u8; INPUT_LEN];
        let mut password = [0u8; INPUT_LEN];

        print!("Username: ");
        input::read_line(&mut user);
        print!("Password: ");
        input::read_line(&mut password);

        if line_str(&user) == ROOT_USER && line_str(&password) == ROOT_PASSWORD {
            log::info!("user {} logged in", ROOT_USER);
            return Session { user };
        }

        log::warn!("failed login for {:?}", line_str(&user));
        colored_print!(ERROR_COLOR, "Wrong Username or Password\n");
    }
}

// ============================================================================
// Command implementations
// ============================================================================

fn cmd_help(_session: &Session) {
    vga_buffer::clear_screen();
    for cmd in COMMANDS {
        colored_print!(MENU_COLOR, " {:<6}| {}\n", cmd.name, cmd.help);
    }
}

fn cmd_clear(_session: &Session) {
    vga_buffer::clear_screen();
}

fn cmd_cow(_session: &Session) {
    println!();
    art::print_cow();
}

fn cmd_rimo(_session: &Session) {
    art::print_rick_and_morty();
}

fn cmd_whoami(session: &Session) {
    println!("{}", session.user());
}

fn cmd_quit(_session: &Session) {
    vga_buffer::clear_screen();
    print!("Shutting down...");
    power::shutdown();
}
