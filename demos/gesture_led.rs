//! Gesture detection in a polling main loop.
//! Target board: STM32F3DISCOVERY
//!
//! A press toggles the "south" led, a double-click lights the "north" led and
//! a long hold turns both off.

// Handle the cases where the example is build with the wrong target architecture
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_main)]
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {
    eprintln!("Error:");
    eprintln!("\tExample does not work with choosen target_arch.");
    eprintln!("\tBuild with for example --target thumbv7em-none-eabihf instead!");
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
use {
    core::cell::{Cell, RefCell},
    core::ops::DerefMut,
    cortex_m::interrupt::Mutex,
    cortex_m_rt::entry,
    gesture_button::{DirectSwitch, GestureConfig, GestureDebouncer},
    panic_halt as _,
    stm32f3xx_hal::{
        hal::digital::v2::OutputPin,
        interrupt,
        prelude::*,
        stm32::{self, TIM1},
        timer::{Event, Timer},
    },
};

#[cfg(all(target_arch = "arm", target_os = "none"))]
static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

#[cfg(all(target_arch = "arm", target_os = "none"))]
static TIMER: Mutex<RefCell<Option<Timer<TIM1>>>> = Mutex::new(RefCell::new(None));

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[entry]
fn main() -> ! {
    let dp = stm32::Peripherals::take().unwrap();

    let mut rcc = dp.RCC.constrain();
    let mut flash = dp.FLASH.constrain();
    let mut gpioe = dp.GPIOE.split(&mut rcc.ahb);
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    let clocks = rcc.cfgr.freeze(&mut flash.acr);

    // 1 kHz tick drives the millisecond clock
    let mut timer = Timer::tim1(dp.TIM1, 1.khz(), clocks, &mut rcc.apb2);
    timer.listen(Event::Update);

    cortex_m::interrupt::free(|cs| {
        TIMER.borrow(cs).borrow_mut().replace(timer);
    });

    let mut south = gpioe
        .pe13
        .into_push_pull_output(&mut gpioe.moder, &mut gpioe.otyper);
    let mut north = gpioe
        .pe9
        .into_push_pull_output(&mut gpioe.moder, &mut gpioe.otyper);
    south.set_low().unwrap();
    north.set_low().unwrap();

    // The user button is externally pulled down and pulled up via a button press
    let user_button = gpioa
        .pa0
        .into_floating_input(&mut gpioa.moder, &mut gpioa.pupdr);
    let mut button = GestureDebouncer::new(
        DirectSwitch::active_high(user_button),
        GestureConfig::DEFAULT,
    );
    button.setup().unwrap();

    unsafe {
        cortex_m::peripheral::NVIC::unmask(stm32::Interrupt::TIM1_UP_TIM16);
    }

    let mut south_on = false;
    let mut last_poll = 0;
    loop {
        let now = cortex_m::interrupt::free(|cs| MILLIS.borrow(cs).get());
        if now == last_poll {
            continue;
        }
        last_poll = now;

        button.check(now).unwrap();

        if button.is_double_clicked() {
            north.set_high().unwrap();
        } else if button.is_pressed() {
            south_on = !south_on;
            if south_on {
                south.set_high().unwrap();
            } else {
                south.set_low().unwrap();
            }
        }

        if button.is_long_held() {
            south_on = false;
            south.set_low().unwrap();
            north.set_low().unwrap();
        }
    }
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[interrupt]
fn TIM1_UP_TIM16() {
    cortex_m::interrupt::free(|cs| {
        if let Some(ref mut timer) = TIMER.borrow(cs).borrow_mut().deref_mut() {
            let millis = MILLIS.borrow(cs);
            millis.set(millis.get().wrapping_add(1));
            timer.clear_update_interrupt_flag();
        }
    });
}
